use super::action::Action;
use super::error::ReplError;
use crate::config::{StoreConfig, ValueMode};
use crate::core::Value;
use crate::storage::TransactionalStore;
use log::{debug, info};
use std::io::{BufRead, Write};

const INVALID_ACTION: &str = "Invalid action. Please choose a valid option.";

enum Flow {
    Continue,
    Exit,
}

/// Line-oriented interactive session driving a [`TransactionalStore`].
///
/// The session owns its store; reads come from `input`, prompts and results
/// go to `output`. Transaction errors and bad values are printed and the
/// loop carries on, I/O errors end it.
pub struct Repl<R, W> {
    input: R,
    output: W,
    store: TransactionalStore,
    value_mode: ValueMode,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    pub fn new(input: R, output: W, config: &StoreConfig) -> Self {
        Self {
            input,
            output,
            store: TransactionalStore::with_config(config),
            value_mode: config.value_mode,
        }
    }

    pub fn store(&self) -> &TransactionalStore {
        &self.store
    }

    pub fn into_store(self) -> TransactionalStore {
        self.store
    }

    /// Run until `EXIT` or end of input.
    pub fn run(&mut self) -> Result<(), ReplError> {
        info!("interactive session started");

        loop {
            let prompt = format!("\nOptions: {}\nChoose an action: ", Action::menu());
            let Some(line) = self.prompt(&prompt)? else {
                break;
            };

            let Some(action) = Action::parse(&line) else {
                writeln!(self.output, "{}", INVALID_ACTION)?;
                continue;
            };

            debug!("dispatching {}", action);
            match self.step(action) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(err) if err.is_recoverable() => {
                    writeln!(self.output, "Error: {}", err)?;
                }
                Err(err) => return Err(err),
            }
        }

        info!("interactive session ended");
        Ok(())
    }

    fn step(&mut self, action: Action) -> Result<Flow, ReplError> {
        match action {
            Action::Begin => {
                self.store.begin()?;
                writeln!(self.output, "Transaction started.")?;
            }
            Action::Put => {
                let Some(key) = self.prompt("Enter key: ")? else {
                    return Ok(Flow::Exit);
                };
                let value_prompt = match self.value_mode {
                    ValueMode::IntegerOnly => "Enter integer value: ",
                    ValueMode::Typed => "Enter value: ",
                };
                let Some(raw) = self.prompt(value_prompt)? else {
                    return Ok(Flow::Exit);
                };

                let value = self.parse_value(&raw)?;
                self.store.put(key.as_str(), value)?;
                writeln!(self.output, "Staged '{}'.", key)?;
            }
            Action::Get => {
                let Some(key) = self.prompt("Enter key: ")? else {
                    return Ok(Flow::Exit);
                };
                match self.store.get(&key) {
                    Some(value) => {
                        writeln!(self.output, "The value at key '{}' is {}", key, value)?
                    }
                    None => writeln!(self.output, "No value found for key.")?,
                }
            }
            Action::Commit => {
                let written = self.store.commit()?;
                let noun = if written == 1 { "key" } else { "keys" };
                writeln!(self.output, "Transaction committed ({} {}).", written, noun)?;
            }
            Action::Rollback => {
                let outcome = self.store.rollback();
                writeln!(self.output, "{}", outcome)?;
            }
            Action::Exit => return Ok(Flow::Exit),
        }

        Ok(Flow::Continue)
    }

    fn parse_value(&self, raw: &str) -> Result<Value, ReplError> {
        match self.value_mode {
            ValueMode::IntegerOnly => raw
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|_| ReplError::InvalidValue(raw.to_string())),
            ValueMode::Typed => {
                let Ok(value) = raw.parse::<Value>();
                Ok(value)
            }
        }
    }

    /// Print `text` and read one trimmed line; `None` at end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>, ReplError> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_script(script: &str, config: &StoreConfig) -> (String, TransactionalStore) {
        let mut output = Vec::new();
        let mut repl = Repl::new(Cursor::new(script.as_bytes()), &mut output, config);
        repl.run().unwrap();
        let store = repl.into_store();
        (String::from_utf8(output).unwrap(), store)
    }

    #[test]
    fn test_exit_stops_reading() {
        let (out, _) = run_script("EXIT\nBEGIN\n", &StoreConfig::default());
        assert!(!out.contains("Transaction started."));
    }

    #[test]
    fn test_invalid_integer_is_reported() {
        let (out, store) = run_script("begin\nput\nk\nabc\n", &StoreConfig::default());
        assert!(out.contains("Error: invalid integer value 'abc'"));
        assert!(store.in_transaction());
    }

    #[test]
    fn test_commit_message_counts_keys() {
        let (out, _) = run_script(
            "begin\ncommit\nbegin\nput\na\n1\ncommit\nbegin\nput\na\n2\nput\nb\n3\ncommit\n",
            &StoreConfig::default(),
        );
        assert!(out.contains("Transaction committed (0 keys)."));
        assert!(out.contains("Transaction committed (1 key)."));
        assert!(out.contains("Transaction committed (2 keys)."));
    }

    #[test]
    fn test_store_reflects_session_state() {
        let mut output = Vec::new();
        let script = "begin\nput\nk\n4\n";
        let mut repl = Repl::new(Cursor::new(script.as_bytes()), &mut output, &StoreConfig::default());
        assert!(!repl.store().in_transaction());

        repl.run().unwrap();
        assert!(repl.store().in_transaction());
        assert_eq!(repl.store().get("k"), Some(&Value::Integer(4)));
        assert!(repl.store().is_empty());
    }

    #[test]
    fn test_typed_mode_accepts_text() {
        let config = StoreConfig::new().value_mode(ValueMode::Typed);
        let (out, store) = run_script("begin\nput\nname\nAda\ncommit\n", &config);
        assert!(out.contains("Enter value: "));
        assert_eq!(store.get("name"), Some(&Value::from("Ada")));
    }
}
