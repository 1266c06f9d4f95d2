/// Request text the host copies for an external assistant to translate `original`.
pub fn translation_prompt(original: &str, target_language: &str) -> String {
    format!(
        "Translate the following text into natural {target_language}. \
         It is game text, so translate it to fit the context:\n\n\
         \"{original}\"\n\n\
         Reply with the translation only."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_the_original() {
        let prompt = translation_prompt("Open the door.", "Korean");
        assert!(prompt.contains("natural Korean"));
        assert!(prompt.contains("\"Open the door.\""));
        assert!(prompt.ends_with("Reply with the translation only."));
    }
}
