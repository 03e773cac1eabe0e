//! Share codes: a text-safe encoded serialization of a recipe for manual
//! copy/paste exchange.
//!
//! The format is percent-encoded base64 of the recipe's JSON. It is not
//! compressed, signed, or versioned. `import_recipe` is the exact inverse
//! of `generate_share_code`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::ShareError;
use crate::recipe::Recipe;

/// Encode a recipe as a clipboard/URL-safe share code.
pub fn generate_share_code(recipe: &Recipe) -> Result<String, ShareError> {
    let json = serde_json::to_string(recipe)?;
    let b64 = STANDARD.encode(json.as_bytes());
    Ok(urlencoding::encode(&b64).into_owned())
}

/// Decode a share code back into a recipe.
///
/// Fails with [`ShareError`] when the text is not validly encoded or does
/// not parse into the expected shape. Callers must leave prior state
/// untouched on failure.
pub fn import_recipe(code: &str) -> Result<Recipe, ShareError> {
    let b64 = urlencoding::decode(code.trim())?;
    let bytes = STANDARD.decode(b64.as_bytes())?;
    let json = String::from_utf8(bytes)?;
    let recipe = serde_json::from_str(&json)?;
    Ok(recipe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::{HopItem, HopUnit, MaltItem, MaltUnit};

    fn sample_recipe() -> Recipe {
        Recipe {
            name: "Hoppy IPA".into(),
            malts: vec![MaltItem {
                name: "Pale Ale".into(),
                amount: 4.5,
                unit: MaltUnit::Kg,
                timing: None,
            }],
            hops: vec![HopItem {
                name: "Citra".into(),
                amount: 30.0,
                unit: HopUnit::G,
                timing: "15 min".into(),
            }],
            yeast: "US-05".into(),
            notes: Some("dry hop on day 4".into()),
            ..Recipe::default()
        }
    }

    #[test]
    fn round_trip_preserves_recipe() {
        let recipe = sample_recipe();
        let code = generate_share_code(&recipe).unwrap();
        let imported = import_recipe(&code).unwrap();
        assert_eq!(imported, recipe);
    }

    #[test]
    fn code_is_clipboard_safe() {
        let code = generate_share_code(&sample_recipe()).unwrap();
        assert!(code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "%-_.~".contains(c)));
    }

    #[test]
    fn garbage_input_is_rejected() {
        assert!(import_recipe("not a share code!!").is_err());
    }

    #[test]
    fn valid_base64_of_wrong_shape_is_rejected() {
        let code = STANDARD.encode(br#"{"foo": 1}"#);
        assert!(matches!(import_recipe(&code), Err(ShareError::Json(_))));
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        let code = generate_share_code(&sample_recipe()).unwrap();
        let padded = format!("  {code}\n");
        assert_eq!(import_recipe(&padded).unwrap(), sample_recipe());
    }
}
