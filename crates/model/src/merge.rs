//! Recursive JSON merge used when copying or overriding result records.

use serde_json::Value;

/// Deep-merges `overrides` into `base`, key by key.
///
/// Override values win; nested objects merge recursively; any other value
/// kind (arrays included) is replaced wholesale.
pub fn deep_merge(base: &mut Value, overrides: &Value) {
    match (base, overrides) {
        (Value::Object(base_map), Value::Object(over_map)) => {
            for (key, over_val) in over_map {
                match base_map.get_mut(key) {
                    Some(base_val) if base_val.is_object() && over_val.is_object() => {
                        deep_merge(base_val, over_val);
                    }
                    _ => {
                        base_map.insert(key.clone(), over_val.clone());
                    }
                }
            }
        }
        (base, overrides) => {
            *base = overrides.clone();
        }
    }
}
