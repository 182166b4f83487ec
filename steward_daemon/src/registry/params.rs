use std::collections::HashMap;

use steward_client::application::Application;
use steward_client::instance::Instance;
use steward_client::service::Service;

pub const OWNER_UUID_PARAM: &str = "owner_uuid";
pub const IMAGE_UUID_PARAM: &str = "image_uuid";
pub const WORKLOAD_UUID_PARAM: &str = "uuid";

/// Flattens the three configuration levels into the parameter set a
/// provisioner consumes. Later levels win on key collision: application,
/// then service, then instance. The three derived identifier keys are
/// authoritative and always overwrite user-supplied values of the same name.
pub fn assemble_params(
    application: &Application,
    service: &Service,
    instance: &Instance,
) -> HashMap<String, String> {
    let mut params = HashMap::new();
    params.extend(application.params.clone());
    params.extend(service.params.clone());
    params.extend(instance.params.clone());
    params.insert(
        String::from(OWNER_UUID_PARAM),
        application.owner_uuid.to_string(),
    );
    params.insert(
        String::from(IMAGE_UUID_PARAM),
        service.image_uuid.to_string(),
    );
    params.insert(
        String::from(WORKLOAD_UUID_PARAM),
        instance.uuid.to_string(),
    );
    params
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use parameterized::parameterized;

    use super::*;
    use crate::test_utilities::create_example_chain;

    fn params_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (String::from(*key), String::from(*value)))
            .collect()
    }

    #[test]
    fn merge_respects_precedence() {
        let (mut application, mut service, mut instance) = create_example_chain();
        application.params = params_of(&[("a", "1"), ("b", "1")]);
        service.params = params_of(&[("b", "2"), ("c", "2")]);
        instance.params = params_of(&[("c", "3"), ("d", "3")]);
        let params = assemble_params(&application, &service, &instance);
        assert_eq!(params.get("a").unwrap(), "1");
        assert_eq!(params.get("b").unwrap(), "2");
        assert_eq!(params.get("c").unwrap(), "3");
        assert_eq!(params.get("d").unwrap(), "3");
        assert_eq!(params.len(), 7);
    }

    #[test]
    fn empty_levels_merge_to_derived_fields_only() {
        let (application, service, instance) = create_example_chain();
        let params = assemble_params(&application, &service, &instance);
        let owner = application.owner_uuid.to_string();
        let image = service.image_uuid.to_string();
        let target = instance.uuid.to_string();
        assert_eq!(
            params,
            params_of(&[
                (OWNER_UUID_PARAM, owner.as_str()),
                (IMAGE_UUID_PARAM, image.as_str()),
                (WORKLOAD_UUID_PARAM, target.as_str()),
            ])
        );
    }

    #[parameterized(key = {OWNER_UUID_PARAM, IMAGE_UUID_PARAM, WORKLOAD_UUID_PARAM})]
    fn derived_fields_overwrite_user_params(key: &str) {
        let (mut application, mut service, mut instance) = create_example_chain();
        application.params = params_of(&[(key, "spoofed")]);
        service.params = params_of(&[(key, "spoofed")]);
        instance.params = params_of(&[(key, "spoofed")]);
        let params = assemble_params(&application, &service, &instance);
        assert_ne!(params.get(key).unwrap(), "spoofed");
    }
}
