//! Parsing of one line of terminal input into a forum action.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// Post the line. Empty or whitespace-only text is blocked later by the
    /// session, never sent.
    Submit(String),
    Like(String),
    Redraw,
    Help,
    Quit,
}

impl InputAction {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();

        if let Some(rest) = trimmed.strip_prefix("/like") {
            let id = rest.trim();
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                return if id.is_empty() {
                    InputAction::Help
                } else {
                    InputAction::Like(id.to_string())
                };
            }
        }

        match trimmed {
            "/list" => InputAction::Redraw,
            "/help" => InputAction::Help,
            "/quit" => InputAction::Quit,
            _ => InputAction::Submit(line.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::InputAction;

    #[test]
    fn plain_text_is_a_submission() {
        assert_eq!(
            InputAction::parse("hello there"),
            InputAction::Submit("hello there".to_string())
        );
    }

    #[test]
    fn blank_line_is_still_a_submission() {
        assert_eq!(
            InputAction::parse("   "),
            InputAction::Submit("   ".to_string())
        );
    }

    #[test]
    fn like_takes_an_id() {
        assert_eq!(
            InputAction::parse("/like 1"),
            InputAction::Like("1".to_string())
        );
        assert_eq!(
            InputAction::parse("  /like   1730000000000 "),
            InputAction::Like("1730000000000".to_string())
        );
    }

    #[test]
    fn like_without_id_shows_help() {
        assert_eq!(InputAction::parse("/like"), InputAction::Help);
    }

    #[test]
    fn unknown_slash_word_is_posted_verbatim() {
        assert_eq!(
            InputAction::parse("/likely not a command"),
            InputAction::Submit("/likely not a command".to_string())
        );
    }

    #[test]
    fn control_commands() {
        assert_eq!(InputAction::parse("/list"), InputAction::Redraw);
        assert_eq!(InputAction::parse("/help"), InputAction::Help);
        assert_eq!(InputAction::parse("/quit"), InputAction::Quit);
    }

    #[test]
    fn only_listed_commands_are_intercepted() {
        assert_eq!(
            InputAction::parse("/exit"),
            InputAction::Submit("/exit".to_string())
        );
    }
}
