//! Parser for model output in the ReAct grammar.
//!
//! Model output is free text; this module turns it into an explicit tagged
//! value so the loop's failure modes stay visible and testable instead of
//! being buried in ad hoc string matching.

use regex::Regex;

/// One model output, classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedStep {
    /// A tool invocation directive
    Action {
        /// Reasoning preceding the action, possibly empty
        thought: String,
        /// Name of the tool to invoke
        tool_name: String,
        /// Raw action input string
        input: String,
    },
    /// The terminal answer
    FinalAnswer {
        /// Reasoning preceding the answer, possibly empty
        thought: String,
        /// Answer text, verbatim
        text: String,
    },
    /// Output matching neither marker
    Malformed {
        /// The raw output for diagnostics
        raw: String,
    },
}

/// Parser extracting ReAct directives from free-text model output
#[derive(Debug)]
pub struct OutputParser {
    /// Matches a Thought / Action / Action Input sequence
    action_regex: Regex,
    /// Matches a Thought / Final Answer sequence
    answer_regex: Regex,
}

impl OutputParser {
    /// Create a new parser with the standard ReAct grammar
    #[must_use]
    pub fn new() -> Self {
        let action_regex = Regex::new(
            r"(?s)(?:Thought:\s*(.*?)\s*)?Action:\s*([^\n\r]+?)\s*Action Input:\s*([^\n\r]+)",
        )
        .expect("action regex is valid");

        let answer_regex =
            Regex::new(r"(?s)(?:Thought:\s*(.*?)\s*)?Final Answer:\s*(.*)").expect("answer regex is valid");

        Self {
            action_regex,
            answer_regex,
        }
    }

    /// Classify one model output.
    ///
    /// An Action takes precedence over a Final Answer appearing in the same
    /// output: the model kept reasoning past a premature answer, so the
    /// action is what it wants next. Parsing never fails; unrecognized text
    /// comes back as [`ParsedStep::Malformed`].
    #[must_use]
    pub fn parse(&self, output: &str) -> ParsedStep {
        let trimmed = output.trim();

        if let Some(captures) = self.action_regex.captures(trimmed) {
            let thought = captures
                .get(1)
                .map_or("", |m| m.as_str())
                .trim()
                .to_string();
            let tool_name = captures
                .get(2)
                .map_or("", |m| m.as_str())
                .trim()
                .to_string();
            let input = strip_quotes(captures.get(3).map_or("", |m| m.as_str())).to_string();

            return ParsedStep::Action {
                thought,
                tool_name,
                input,
            };
        }

        if let Some(captures) = self.answer_regex.captures(trimmed) {
            let thought = captures
                .get(1)
                .map_or("", |m| m.as_str())
                .trim()
                .to_string();
            let text = captures
                .get(2)
                .map_or("", |m| m.as_str())
                .trim()
                .to_string();

            return ParsedStep::FinalAnswer { thought, text };
        }

        ParsedStep::Malformed {
            raw: trimmed.to_string(),
        }
    }
}

impl Default for OutputParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip one pair of matching surrounding quotes, if present
fn strip_quotes(s: &str) -> &str {
    let s = s.trim();
    let bytes = s.as_bytes();
    if s.len() >= 2 {
        let (first, last) = (bytes[0], bytes[s.len() - 1]);
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return &s[1..s.len() - 1];
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn parse(output: &str) -> ParsedStep {
        OutputParser::new().parse(output)
    }

    #[test]
    fn test_action_with_thought() {
        let output = "Thought: I should search for this\nAction: web_search\nAction Input: rust agents";

        assert_eq!(
            parse(output),
            ParsedStep::Action {
                thought: "I should search for this".to_string(),
                tool_name: "web_search".to_string(),
                input: "rust agents".to_string(),
            }
        );
    }

    #[test]
    fn test_action_without_thought() {
        let output = "Action: web_search\nAction Input: rust agents";

        let ParsedStep::Action {
            thought,
            tool_name,
            input,
        } = parse(output)
        else {
            panic!("expected an action");
        };
        assert!(thought.is_empty());
        assert_eq!(tool_name, "web_search");
        assert_eq!(input, "rust agents");
    }

    #[test]
    fn test_final_answer() {
        let output = "Thought: I now know the final answer\nFinal Answer: There are 302 openings.";

        assert_eq!(
            parse(output),
            ParsedStep::FinalAnswer {
                thought: "I now know the final answer".to_string(),
                text: "There are 302 openings.".to_string(),
            }
        );
    }

    #[test]
    fn test_action_takes_precedence_over_answer() {
        let output = "Final Answer: not yet\nThought: actually I need more data\nAction: web_search\nAction Input: more data";

        assert!(matches!(parse(output), ParsedStep::Action { .. }));
    }

    #[test]
    fn test_multiline_answer_is_kept_whole() {
        let output = "Final Answer: First line.\nSecond line with a URL: https://example.com";

        let ParsedStep::FinalAnswer { text, .. } = parse(output) else {
            panic!("expected a final answer");
        };
        assert!(text.contains("First line."));
        assert!(text.contains("https://example.com"));
    }

    #[test]
    fn test_action_input_cut_at_line_break() {
        let output = "Action: web_search\nAction Input: rust agents\nObservation: should not leak";

        let ParsedStep::Action { input, .. } = parse(output) else {
            panic!("expected an action");
        };
        assert_eq!(input, "rust agents");
    }

    #[test_case("\"quoted query\"", "quoted query" ; "double quotes")]
    #[test_case("'quoted query'", "quoted query" ; "single quotes")]
    #[test_case("plain query", "plain query" ; "no quotes")]
    #[test_case("\"mismatched'", "\"mismatched'" ; "mismatched quotes kept")]
    fn test_quote_stripping(raw: &str, expected: &str) {
        let output = format!("Action: web_search\nAction Input: {raw}");

        let ParsedStep::Action { input, .. } = parse(&output) else {
            panic!("expected an action");
        };
        assert_eq!(input, expected);
    }

    #[test_case("I am thinking out loud with no directive" ; "free text")]
    #[test_case("Action: web_search" ; "action without input")]
    #[test_case("" ; "empty output")]
    fn test_malformed(output: &str) {
        assert!(matches!(parse(output), ParsedStep::Malformed { .. }));
    }
}
