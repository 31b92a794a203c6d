//! XInput capability subtypes.
//!
//! Values are the `XINPUT_DEVSUBTYPE_*` codes reported in
//! `XINPUT_CAPABILITIES::SubType`.

pub const SUBTYPE_UNKNOWN: u8 = 0x00;
pub const SUBTYPE_GAMEPAD: u8 = 0x01;
pub const SUBTYPE_WHEEL: u8 = 0x02;
pub const SUBTYPE_ARCADE_STICK: u8 = 0x03;
pub const SUBTYPE_FLIGHT_STICK: u8 = 0x04;
pub const SUBTYPE_DANCE_PAD: u8 = 0x05;
pub const SUBTYPE_GUITAR: u8 = 0x06;
pub const SUBTYPE_GUITAR_ALTERNATE: u8 = 0x07;
pub const SUBTYPE_DRUM_KIT: u8 = 0x08;
pub const SUBTYPE_GUITAR_BASS: u8 = 0x0B;
pub const SUBTYPE_ARCADE_PAD: u8 = 0x13;

/// Display name for a capability subtype.
pub fn subtype_name(subtype: u8) -> &'static str {
    match subtype {
        SUBTYPE_GAMEPAD => "Gamepad",
        SUBTYPE_WHEEL => "Wheel",
        SUBTYPE_ARCADE_STICK => "Arcade Stick",
        SUBTYPE_FLIGHT_STICK => "Flight Stick",
        SUBTYPE_DANCE_PAD => "Dance Pad",
        SUBTYPE_GUITAR | SUBTYPE_GUITAR_ALTERNATE => "Guitar",
        SUBTYPE_DRUM_KIT => "Drum Kit",
        SUBTYPE_GUITAR_BASS => "Bass Guitar",
        SUBTYPE_ARCADE_PAD => "Arcade Pad",
        _ => "Controller",
    }
}
