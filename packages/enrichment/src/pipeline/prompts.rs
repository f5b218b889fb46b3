//! LLM prompt for snippet extraction.

use crate::pipeline::template::Template;

/// Opening instruction.
pub const PROMPT_PREFIX: &str =
    "You are a helpful assistant tasked with extracting specific information. ";

/// Joins the instruction to the search snippet.
pub const PROMPT_SNIPPET_INTRO: &str = " using the following search results:\n\n";

/// Closing instruction.
pub const PROMPT_SUFFIX: &str = "\n\nPlease provide only the extracted information as a response.";

/// Build the extraction prompt for one entity.
///
/// Pure: the same template, entity and snippet always produce the same prompt.
pub fn format_extraction_prompt(template: &Template, entity: &str, snippet: &str) -> String {
    let instruction = template.render(entity);
    let mut prompt = String::with_capacity(
        PROMPT_PREFIX.len()
            + instruction.len()
            + PROMPT_SNIPPET_INTRO.len()
            + snippet.len()
            + PROMPT_SUFFIX.len(),
    );
    prompt.push_str(PROMPT_PREFIX);
    prompt.push_str(&instruction);
    prompt.push_str(PROMPT_SNIPPET_INTRO);
    prompt.push_str(snippet);
    prompt.push_str(PROMPT_SUFFIX);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_layout() {
        let template = Template::parse("Get me the email of {Company}").unwrap();
        let prompt =
            format_extraction_prompt(&template, "OpenAI", "Contact email: info@openai.com.");

        assert_eq!(
            prompt,
            "You are a helpful assistant tasked with extracting specific information. \
             Get me the email of OpenAI using the following search results:\n\n\
             Contact email: info@openai.com.\n\n\
             Please provide only the extracted information as a response."
        );
    }

    #[test]
    fn test_prompt_is_pure() {
        let template = Template::parse("Find the location of {Fruits}").unwrap();
        let a = format_extraction_prompt(&template, "Mango", "grown in India");
        let b = format_extraction_prompt(&template, "Mango", "grown in India");
        assert_eq!(a, b);
    }
}
