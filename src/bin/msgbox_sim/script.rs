//! Scripted dialog input for the `dialog` subcommand.

use msgbox_sim::{Error, Key, Result, ToolkitEvent, WidgetHandle};

/// One scripted input: `click:N` or a key name such as `ENTER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Click(usize),
    Key(Key),
}

impl Input {
    pub fn parse(token: &str) -> Result<Self> {
        let token = token.trim();
        if let Some(index) = token.strip_prefix("click:") {
            return index
                .parse()
                .map(Self::Click)
                .map_err(|_| Error::Other(format!("Invalid button index in '{token}'")));
        }
        match Key::from_name(token) {
            Key::Other => Err(Error::Other(format!("Unknown input '{token}'"))),
            key => Ok(Self::Key(key)),
        }
    }

    pub fn to_event(self, panel: WidgetHandle) -> ToolkitEvent {
        match self {
            Self::Click(button) => ToolkitEvent::ButtonClicked { panel, button },
            Self::Key(key) => ToolkitEvent::KeyPressed { panel, key },
        }
    }
}

/// Parse a comma-separated input list.
pub fn parse_inputs(script: &str) -> Result<Vec<Input>> {
    script
        .split(',')
        .filter(|t| !t.trim().is_empty())
        .map(Input::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_inputs() {
        let inputs = parse_inputs("RIGHT, click:2,enter").unwrap();
        assert_eq!(
            inputs,
            vec![Input::Key(Key::Right), Input::Click(2), Input::Key(Key::Enter)]
        );
    }

    #[test]
    fn test_unknown_input_rejected() {
        assert!(parse_inputs("ENTER,F12").is_err());
        assert!(parse_inputs("click:x").is_err());
    }
}
