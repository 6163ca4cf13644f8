/// YAML tag marking an explicit component reference (`!ref daq`)
pub const REF_TAG: &str = "ref";
/// Single key of a map marking an explicit component reference (`{"$ref": "daq"}`)
pub const REF_KEY: &str = "$ref";
/// Constructor argument carrying the component's own id
pub const UID_ARG: &str = "uid";
/// Separator between namespace and type name in a target
pub const TARGET_SEPARATOR: char = '.';
