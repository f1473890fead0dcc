//! Prompt templates sent to the model.

/// Build the prompt for a three-bullet summary of `text`.
pub fn summarize_prompt(text: &str) -> String {
    format!(
        "Summarize the following text in 3 concise bullet points:\n\n{}",
        text
    )
}

/// Build the prompt for a plain-language explanation of `text`.
pub fn explain_prompt(text: &str) -> String {
    format!(
        "Explain the following text in simple terms for a general audience, concisely:\n\n{}",
        text
    )
}

/// Build the prompt for answering `question` from `context`.
pub fn chat_prompt(question: &str, context: &str) -> String {
    format!(
        "Context: {}\n\nQuestion: {}\n\nAnswer based on the context.",
        context, question
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_prompt() {
        let prompt = summarize_prompt("hello");
        assert!(prompt.starts_with("Summarize the following text in 3 concise bullet points:"));
        assert!(prompt.ends_with("hello"));
    }

    #[test]
    fn test_explain_prompt() {
        let prompt = explain_prompt("quantum tunnelling");
        assert!(prompt.contains("simple terms for a general audience"));
        assert!(prompt.ends_with("quantum tunnelling"));
    }

    #[test]
    fn test_chat_prompt_orders_context_before_question() {
        let prompt = chat_prompt("What?", "Some page");
        assert_eq!(
            prompt,
            "Context: Some page\n\nQuestion: What?\n\nAnswer based on the context."
        );
    }
}
