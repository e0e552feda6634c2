use region_shot_core::DraftField;

/// Help shown inside the interactive draft session.
pub(crate) const DRAFT_HELP: &str = "\
  set <field> <value>   Edit name, x1, y1, x2 or y2
  capture               Start hotkey capture (new regions only)
  done                  Finish capture now, even with a corner missing
  preview               Render a preview of the current draft
  back                  Return from preview to the form
  save                  Validate and save
  cancel                Cancel capture, or discard the draft
  help                  Show this message";

/// One line typed during an interactive draft session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftInput {
    /// Edit a field.
    Set {
        /// Field to edit.
        field: DraftField,
        /// Raw value as typed.
        value: String,
    },
    /// Start hotkey capture.
    Capture,
    /// Finish capture early.
    Done,
    /// Render a preview.
    Preview,
    /// Back from preview to the form.
    Back,
    /// Save the draft.
    Save,
    /// Cancel capture, or the whole draft when not capturing.
    Cancel,
    /// Show help.
    Help,
    /// Blank line.
    Empty,
}

impl DraftInput {
    /// Parse one input line. Unknown input is reported back as the error text.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(DraftInput::Empty);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "set" => {
                let (field, value) = match rest.split_once(char::is_whitespace) {
                    Some((field, value)) => (field, value.trim()),
                    None => (rest, ""),
                };
                let field = field.parse::<DraftField>()?;
                Ok(DraftInput::Set {
                    field,
                    value: value.to_string(),
                })
            }
            "capture" | "c" => Ok(DraftInput::Capture),
            "done" | "d" => Ok(DraftInput::Done),
            "preview" | "p" => Ok(DraftInput::Preview),
            "back" | "return" => Ok(DraftInput::Back),
            "save" | "s" => Ok(DraftInput::Save),
            "cancel" | "quit" | "q" => Ok(DraftInput::Cancel),
            "help" | "?" => Ok(DraftInput::Help),
            other => Err(format!("unknown input '{}', type 'help'", other)),
        }
    }
}
