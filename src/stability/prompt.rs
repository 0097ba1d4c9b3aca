use crate::models::GenerationMode;

/// Wraps the raw instruction in the fixed template for `mode`.
pub fn compose_prompt(mode: GenerationMode, instruction: &str) -> String {
    let instruction = instruction.trim();
    match mode {
        GenerationMode::Edit => format!(
            "You are editing the provided product photo.\n\
             \n\
             Apply ONLY these changes: {}\n\
             \n\
             Keep the same product, shape, camera angle and proportions.\n\
             Do NOT change the object identity.\n\
             Do NOT add extra objects, people, text, or logos.\n\
             Just adjust background, colors and lighting to match the request.",
            instruction
        ),
        GenerationMode::Generate => format!(
            "Generate a clean, high-quality, realistic e-commerce product photo.\n\
             \n\
             Follow this instruction: {}\n\
             \n\
             The result should be sharp, well lit, and professional, suitable for product listings or ads.",
            instruction
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_template_preserves_identity() {
        let prompt = compose_prompt(GenerationMode::Edit, "make the background beige");
        assert!(prompt.starts_with("You are editing the provided product photo."));
        assert!(prompt.contains("Apply ONLY these changes: make the background beige\n"));
        assert!(prompt.contains("Do NOT change the object identity."));
        assert!(prompt.ends_with("to match the request."));
    }

    #[test]
    fn test_generate_template() {
        let prompt = compose_prompt(GenerationMode::Generate, "  a ceramic mug on oak  ");
        assert!(prompt.starts_with("Generate a clean, high-quality"));
        assert!(prompt.contains("Follow this instruction: a ceramic mug on oak\n"));
        assert!(!prompt.contains("editing"));
    }
}
