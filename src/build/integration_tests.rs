#[cfg(test)]
mod integration_tests {
    use crate::build::{build_objects, BuildContext};
    use crate::config::{load_build_group, load_instrument_config_and_validate, Registry};
    use crate::errors::BuildErrorKind;
    use std::sync::Arc;

    /// Every device in the shipped instrument config builds, dependencies first
    #[test]
    fn test_build_simulated_instrument_devices() {
        let config = load_instrument_config_and_validate("configs/simulated-instrument.yaml").unwrap();
        let registry = Registry::with_simulated_devices();

        let (built, errors) = build_objects(&config.devices, &registry);

        assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
        assert_eq!(built.len(), config.devices.len());
        assert_eq!(built.keys().next().map(String::as_str), Some("daq"));

        let camera = built["camera"].as_camera().unwrap();
        assert_eq!(camera.exposure_ms(), 15.0);
        assert_eq!(built["x_axis"].as_axis().map(|a| a.position_mm()), Some(0.0));
    }

    /// Shared dependencies are built once and handed out by reference
    #[test]
    fn test_shared_dependency_is_one_instance() {
        let config = load_instrument_config_and_validate("configs/simulated-instrument.yaml").unwrap();
        let registry = Registry::with_simulated_devices();

        let (built, _) = build_objects(&config.devices, &registry);

        let laser = built["laser_561"]
            .downcast_ref::<crate::devices::SimulatedLaser>()
            .unwrap();
        let camera = built["camera"]
            .downcast_ref::<crate::devices::SimulatedCamera>()
            .unwrap();
        assert!(Arc::ptr_eq(laser.modulation_source().unwrap(), &built["daq"]));
        assert!(Arc::ptr_eq(camera.trigger_source().unwrap(), &built["daq"]));
    }

    /// One bad device takes down its dependents and nothing else
    #[test]
    fn test_failure_isolation_group() {
        let specs = load_build_group("configs/failure-isolation.yaml").unwrap();
        let registry = Registry::with_simulated_devices();

        let (built, errors) = build_objects(&specs, &registry);

        assert_eq!(built.keys().collect::<Vec<_>>(), vec!["x_axis"]);
        assert_eq!(errors["daq"].kind, BuildErrorKind::Instantiation);
        assert_eq!(errors["camera"].kind, BuildErrorKind::Dependency);
        assert_eq!(errors["laser_488"].kind, BuildErrorKind::Dependency);
        assert_eq!(errors["unregistered"].kind, BuildErrorKind::Import);
        assert_eq!(built.len() + errors.len(), specs.len());
    }

    /// Resolving a leaf first leaves the rest of the group to `build`
    #[test]
    fn test_resolve_then_build() {
        let specs = load_build_group("configs/simple-group.toml").unwrap();
        let registry = Registry::with_simulated_devices();
        let mut context = BuildContext::new(&specs, &registry);

        assert!(context.resolve("daq").is_built());
        assert_eq!(context.built().len(), 1);

        context.build();
        let (built, errors) = context.into_parts();
        assert!(errors.is_empty());
        assert_eq!(built.len(), 2);
        assert!(built["laser_405"].as_laser().is_some());
    }
}
