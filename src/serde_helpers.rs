use serde::de::DeserializeOwned;
use serde_json::Value;

/// Deserializes `value` into `T`, reporting skipped fields and the path of any failure.
///
/// The submissions document carries far more fields than the crate models, so skipped
/// fields are reported at `debug` only.
#[cfg(feature = "tracing")]
pub(crate) fn deserialize_with_warnings<T: DeserializeOwned>(
    value: Value,
) -> Result<T, serde_json::Error> {
    let mut ignored = Vec::new();
    let mut track = |path: serde_ignored::Path<'_>| {
        ignored.push(path.to_string());
    };
    let deserializer = serde_ignored::Deserializer::new(value, &mut track);

    let result: T = serde_path_to_error::deserialize(deserializer).map_err(|e| {
        tracing::error!(
            path = %e.path(),
            type_name = std::any::type_name::<T>(),
            "failed to deserialize response"
        );
        e.into_inner()
    })?;

    if !ignored.is_empty() {
        tracing::debug!(
            type_name = std::any::type_name::<T>(),
            count = ignored.len(),
            fields = ?ignored,
            "skipped unmodelled fields"
        );
    }

    Ok(result)
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn deserialize_with_warnings<T: DeserializeOwned>(
    value: Value,
) -> Result<T, serde_json::Error> {
    serde_json::from_value(value)
}
