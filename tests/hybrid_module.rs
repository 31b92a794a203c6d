use hybridstick::backends::{
    AxisMode, ConfigureFn, CooperativeLevel, CreateOptions, DataFormat, DeviceFilter,
    DeviceInstance, DeviceProperties, EnumControl, HighLevelApi, LowLevelApi, Platform,
    PropertyStatus,
};
use hybridstick::registry::DeviceRegistry;
use hybridstick::report::{LowLevelOutcome, ScanOutcome};
use hybridstick::{
    ApiKind, DeviceClass, DeviceError, DeviceList, DeviceMeta, DeviceOrigin, EnumError,
    HardwareId, HybridError, HybridJoystickModule, InitPhase, InputDevice, InputModule,
    ModuleOptions, PropertyError, ScanError,
};
use std::cell::RefCell;
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Fake platform
// ---------------------------------------------------------------------------

struct FakeRegistry(Result<Vec<String>, ScanError>);

impl DeviceRegistry for FakeRegistry {
    fn present_device_ids(&self) -> Result<Vec<String>, ScanError> {
        self.0.clone()
    }
}

struct FakeDevice {
    id: String,
    name: String,
    origin: DeviceOrigin,
    meta: DeviceMeta,
    axis_result: Result<PropertyStatus, PropertyError>,
}

impl DeviceProperties for FakeDevice {
    fn set_axis_mode(&mut self, mode: AxisMode) -> Result<PropertyStatus, PropertyError> {
        assert_eq!(mode, AxisMode::Absolute);
        self.axis_result.clone()
    }
}

impl InputDevice for FakeDevice {
    fn name(&self) -> &str {
        &self.name
    }
    fn id(&self) -> &str {
        &self.id
    }
    fn origin(&self) -> DeviceOrigin {
        self.origin
    }
    fn metadata(&self) -> DeviceMeta {
        self.meta.clone()
    }
}

#[derive(Clone, Default)]
struct FakeLowLevel {
    instances: Vec<DeviceInstance>,
    enum_broken: bool,
    /// Per-path axis-mode answer; default `Applied`.
    axis_results: HashMap<String, Result<PropertyStatus, PropertyError>>,
    created: RefCell<Vec<(String, CreateOptions)>>,
}

impl LowLevelApi for FakeLowLevel {
    fn enumerate_attached(
        &self,
        filter: DeviceFilter,
        visit: &mut dyn FnMut(&DeviceInstance) -> EnumControl,
    ) -> Result<(), EnumError> {
        assert_eq!(filter, DeviceFilter::GameController);
        if self.enum_broken {
            return Err(EnumError::new("enumeration unavailable"));
        }
        for inst in &self.instances {
            if visit(inst) == EnumControl::Stop {
                break;
            }
        }
        Ok(())
    }

    fn create_device(
        &self,
        instance: &DeviceInstance,
        options: &CreateOptions,
        configure: ConfigureFn<'_>,
    ) -> Result<Box<dyn InputDevice>, DeviceError> {
        self.created
            .borrow_mut()
            .push((instance.path.clone(), *options));
        let mut dev = FakeDevice {
            id: instance.path.clone(),
            name: instance.name.clone(),
            origin: DeviceOrigin::LowLevel,
            meta: instance.meta.clone(),
            axis_result: self
                .axis_results
                .get(&instance.path)
                .cloned()
                .unwrap_or(Ok(PropertyStatus::Applied)),
        };
        configure(&mut dev)?;
        Ok(Box::new(dev))
    }
}

#[derive(Clone, Default)]
struct FakeHighLevel {
    connected: [bool; 4],
    /// Slots whose capability query fails even though they report connected.
    broken: [bool; 4],
}

impl HighLevelApi for FakeHighLevel {
    fn slot_connected(&self, slot: u32) -> bool {
        self.connected[slot as usize]
    }

    fn create_slot_device(&self, slot: u32) -> Result<Box<dyn InputDevice>, DeviceError> {
        if self.broken[slot as usize] {
            return Err(DeviceError::SlotDisconnected(slot));
        }
        Ok(Box::new(FakeDevice {
            id: format!("xinput:{slot}"),
            name: format!("XInput Player {}", slot + 1),
            origin: DeviceOrigin::HighLevel,
            meta: DeviceMeta {
                bus: Some("xinput".into()),
                xinput_slot: Some(slot),
                ..Default::default()
            },
            axis_result: Ok(PropertyStatus::NoEffect),
        }))
    }
}

struct FakePlatform {
    registry: FakeRegistry,
    low: FakeLowLevel,
    high: FakeHighLevel,
    low_available: bool,
    high_available: bool,
    low_opens: usize,
    high_opens: usize,
}

impl FakePlatform {
    fn new(registry: Result<Vec<String>, ScanError>) -> Self {
        Self {
            registry: FakeRegistry(registry),
            low: FakeLowLevel::default(),
            high: FakeHighLevel::default(),
            low_available: true,
            high_available: true,
            low_opens: 0,
            high_opens: 0,
        }
    }
}

impl Platform for FakePlatform {
    type LowLevel = FakeLowLevel;
    type HighLevel = FakeHighLevel;
    type Registry = FakeRegistry;

    fn open_low_level(&mut self) -> Result<FakeLowLevel, HybridError> {
        if !self.low_available {
            return Err(HybridError::HelperInit {
                api: ApiKind::LowLevel,
                reason: "not installed".into(),
            });
        }
        self.low_opens += 1;
        Ok(self.low.clone())
    }

    fn open_high_level(&mut self) -> Result<FakeHighLevel, HybridError> {
        if !self.high_available {
            return Err(HybridError::HelperInit {
                api: ApiKind::HighLevel,
                reason: "XInput not present".into(),
            });
        }
        self.high_opens += 1;
        Ok(self.high.clone())
    }

    fn registry(&self) -> &FakeRegistry {
        &self.registry
    }
}

fn hid(path: &str, vid: u16, pid: u16) -> DeviceInstance {
    DeviceInstance {
        name: format!("HID {vid:04x}:{pid:04x}"),
        product: HardwareId::new(vid, pid),
        path: path.to_string(),
        meta: DeviceMeta {
            bus: Some("hid".into()),
            vid: Some(vid),
            pid: Some(pid),
            path: Some(path.to_string()),
            ..Default::default()
        },
    }
}

fn ids(list: &DeviceList) -> Vec<String> {
    list.iter().map(|e| e.device.id().to_string()).collect()
}

fn scenario_a_platform() -> FakePlatform {
    let mut p = FakePlatform::new(Ok(vec![
        "VID_045E&PID_028E&IG_00".into(),
        "VID_1234&PID_5678".into(),
    ]));
    p.low.instances = vec![hid("hid#xbox", 0x045E, 0x028E), hid("hid#stick", 0x1234, 0x5678)];
    p
}

fn ready(platform: FakePlatform) -> HybridJoystickModule<FakePlatform> {
    let mut module = HybridJoystickModule::new(platform);
    module.init(&ModuleOptions::default()).unwrap();
    module
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn marked_model_is_left_to_xinput() {
    let mut platform = scenario_a_platform();
    platform.high.connected = [true, false, false, false];
    let mut module = ready(platform);
    let mut devices = DeviceList::new();

    let report = module.input_init(&mut devices).unwrap();

    assert_eq!(report.scan, ScanOutcome::Scanned);
    assert_eq!(report.markers, vec![HardwareId::new(0x045E, 0x028E)]);
    assert_eq!(ids(&devices), ["hid#stick", "xinput:0"]);
    assert_eq!(report.low_level[0].outcome, LowLevelOutcome::SkippedXInput);
    assert_eq!(report.low_level[1].outcome, LowLevelOutcome::Registered);
    assert!(devices.iter().all(|e| e.class == DeviceClass::Joystick));

    // The skipped device was never opened.
    let created = module.helpers().low_level().unwrap().created.borrow().clone();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].0, "hid#stick");
    assert_eq!(created[0].1.format, DataFormat::Joystick);

    assert_eq!(module.phase(), InitPhase::Done);
}

#[test]
fn failed_scan_registers_every_hid_device_and_skips_xinput() {
    let mut platform = scenario_a_platform();
    platform.registry = FakeRegistry(Err(ScanError::SizeQuery(0x1F)));
    platform.high.connected = [true; 4];
    let mut module = ready(platform);
    let mut devices = DeviceList::new();

    let report = module.input_init(&mut devices).unwrap();

    assert!(matches!(report.scan, ScanOutcome::Failed { .. }));
    assert!(report.markers.is_empty());
    assert!(report.high_level_skipped);
    assert!(report.high_level.is_empty());
    assert_eq!(ids(&devices), ["hid#xbox", "hid#stick"]);
    assert!(devices.iter().all(|e| e.device.origin() == DeviceOrigin::LowLevel));
    assert_eq!(module.phase(), InitPhase::Done);
}

#[test]
fn only_connected_slots_are_registered() {
    let mut platform = FakePlatform::new(Ok(vec![]));
    platform.high.connected = [true, false, true, false];
    let mut module = ready(platform);
    let mut devices = DeviceList::new();

    let report = module.input_init(&mut devices).unwrap();

    assert_eq!(ids(&devices), ["xinput:0", "xinput:2"]);
    let slots: Vec<_> = devices
        .iter()
        .map(|e| e.device.metadata().xinput_slot)
        .collect();
    assert_eq!(slots, [Some(0), Some(2)]);
    assert_eq!(report.high_level.len(), 4);
    assert_eq!(report.registered_high_level(), 2);
    assert!(!report.high_level[1].connected);
}

#[test]
fn failed_slot_creation_is_recorded_and_skipped() {
    let mut platform = FakePlatform::new(Ok(vec![]));
    platform.high.connected = [true, true, false, false];
    platform.high.broken = [false, true, false, false];
    let mut module = ready(platform);
    let mut devices = DeviceList::new();

    let report = module.input_init(&mut devices).unwrap();

    assert_eq!(ids(&devices), ["xinput:0"]);
    let failed = &report.high_level[1];
    assert!(failed.connected);
    assert!(!failed.registered);
    assert!(failed.error.is_some());
    assert_eq!(report.registered_high_level(), 1);
    assert_eq!(module.phase(), InitPhase::Done);
}

#[test]
fn xinput_slots_ignore_marker_set() {
    let mut platform = scenario_a_platform();
    platform.low.instances.clear();
    platform.high.connected = [true, true, true, true];
    let mut module = ready(platform);
    let mut devices = DeviceList::new();

    module.input_init(&mut devices).unwrap();
    assert_eq!(devices.len(), 4);
    assert!(devices.iter().all(|e| e.device.origin() == DeviceOrigin::HighLevel));
}

#[test]
fn configuration_failure_drops_only_that_device() {
    let mut platform = FakePlatform::new(Ok(vec![]));
    platform.low.instances = vec![
        hid("hid#a", 0x0001, 0x0001),
        hid("hid#broken", 0x0002, 0x0002),
        hid("hid#pedals", 0x0003, 0x0003),
    ];
    platform
        .low
        .axis_results
        .insert("hid#broken".into(), Err(PropertyError::Failed(0x8000_4005)));
    platform
        .low
        .axis_results
        .insert("hid#pedals".into(), Ok(PropertyStatus::NoEffect));
    let mut module = ready(platform);
    let mut devices = DeviceList::new();

    let report = module.input_init(&mut devices).unwrap();

    assert_eq!(ids(&devices), ["hid#a", "hid#pedals"]);
    assert!(matches!(
        report.low_level[1].outcome,
        LowLevelOutcome::CreateFailed { .. }
    ));
    assert_eq!(report.registered_low_level(), 2);
    assert_eq!(module.phase(), InitPhase::Done);
}

#[test]
fn broken_enumeration_is_fatal() {
    let mut platform = FakePlatform::new(Ok(vec![]));
    platform.low.enum_broken = true;
    platform.high.connected = [true; 4];
    let mut module = ready(platform);
    let mut devices = DeviceList::new();

    let err = module.input_init(&mut devices).unwrap_err();

    assert!(matches!(err, HybridError::Enumeration(_)));
    assert!(devices.is_empty());
    assert_eq!(module.phase(), InitPhase::MarkerScanned);
}

#[test]
fn background_option_selects_cooperative_level() {
    let mut module = HybridJoystickModule::new(scenario_a_platform());
    module
        .init(&ModuleOptions::from_toml_str("background_input = true").unwrap())
        .unwrap();
    module.input_init(&mut DeviceList::new()).unwrap();

    let created = module.helpers().low_level().unwrap().created.borrow().clone();
    assert_eq!(created[0].1.cooperative, CooperativeLevel::Background);

    let mut module = ready(scenario_a_platform());
    module.input_init(&mut DeviceList::new()).unwrap();
    let created = module.helpers().low_level().unwrap().created.borrow().clone();
    assert_eq!(created[0].1.cooperative, CooperativeLevel::Foreground);
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[test]
fn input_init_requires_helpers() {
    let mut module = HybridJoystickModule::new(scenario_a_platform());
    let err = module.input_init(&mut DeviceList::new()).unwrap_err();
    assert!(matches!(err, HybridError::NotInitialized));
    assert_eq!(module.phase(), InitPhase::NotStarted);
}

#[test]
fn unavailable_helper_fails_probe_and_init() {
    let mut platform = scenario_a_platform();
    platform.low_available = false;
    let mut module = HybridJoystickModule::new(platform);

    assert!(!module.probe());
    let err = module.init(&ModuleOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        HybridError::HelperInit {
            api: ApiKind::LowLevel,
            ..
        }
    ));
    assert!(!module.helpers().is_open());
    // The XInput helper opened before the failure is kept, not re-created.
    assert_eq!(module.platform().high_opens, 1);
}

#[test]
fn missing_xinput_makes_module_unavailable() {
    let mut platform = scenario_a_platform();
    platform.high_available = false;
    let mut module = HybridJoystickModule::new(platform);

    assert!(!module.probe());
    let err = module.init(&ModuleOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        HybridError::HelperInit {
            api: ApiKind::HighLevel,
            ..
        }
    ));
    assert!(!module.helpers().is_open());
    // XInput is opened first, so HID is never touched.
    assert_eq!(module.platform().low_opens, 0);
}

#[test]
fn helpers_are_created_once_and_recreated_after_exit() {
    let mut module = HybridJoystickModule::new(scenario_a_platform());
    assert_eq!(module.name(), "winhybrid");

    assert!(module.probe());
    module.init(&ModuleOptions::default()).unwrap();
    assert_eq!(module.platform().low_opens, 1);
    assert_eq!(module.platform().high_opens, 1);

    module.input_init(&mut DeviceList::new()).unwrap();
    module.exit();
    assert!(!module.helpers().is_open());
    assert_eq!(module.phase(), InitPhase::NotStarted);
    module.exit();

    module.init(&ModuleOptions::default()).unwrap();
    assert!(module.helpers().is_open());
    assert_eq!(module.platform().low_opens, 2);
    assert_eq!(module.platform().high_opens, 2);
}

#[test]
fn report_serializes_decisions() {
    let mut module = ready(scenario_a_platform());
    let report = module.input_init(&mut DeviceList::new()).unwrap();
    let json = report.to_json().unwrap();

    assert!(json.contains("\"skipped_xinput\""));
    assert!(json.contains("\"045e:028e\""));
    assert!(json.contains("\"registered\""));
}
