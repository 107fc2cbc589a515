use crate::conversion::engine::{ConversionEngine, ConvertedJson};
use crate::conversion::{ConversionConfig, ConversionResult};
use crate::parser::JsonSource;

/// Batch convert multiple JsonSource inputs. Optionally continue on errors.
pub fn convert_batch_sources(
    sources: Vec<JsonSource>,
    config: &ConversionConfig,
    continue_on_error: bool,
) -> ConversionResult<Vec<(JsonSource, ConvertedJson)>> {
    let engine = ConversionEngine::new(config.clone());
    let mut results = Vec::new();

    for src in sources {
        match engine.convert_from_source(&src) {
            Ok(converted) => results.push((src, converted)),
            Err(e) => {
                if continue_on_error {
                    tracing::warn!(
                        source = %src.description(),
                        "skipping input: {}",
                        e.user_message()
                    );
                    continue;
                } else {
                    return Err(e);
                }
            }
        }
    }

    Ok(results)
}
