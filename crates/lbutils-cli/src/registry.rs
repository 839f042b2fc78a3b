use std::collections::BTreeMap;
use std::io::Write;

use chrono::Local;
use lbutils_format::{Choice, DEFAULT_YEAR_RANGE, month_choices, year_choices};
use lbutils_query::Lookup;
use tracing::debug;

/// A named action the `call` command can run. Writes its result to `out`.
pub type Action = fn(&mut dyn Write) -> anyhow::Result<()>;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RegistryError {
    #[error("no function named '{name}' (registered: {known})")]
    Unknown { name: String, known: String },

    #[error("function '{0}' is already registered")]
    Duplicate(String),
}

/// Actions callable by name. Populated once at startup; nothing is looked up
/// dynamically beyond what was registered.
#[derive(Default)]
pub struct Registry {
    actions: BTreeMap<&'static str, Action>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The actions shipped with the binary.
    pub fn builtin() -> Self {
        let builtins: [(&'static str, Action); 3] = [
            ("lookups", print_lookups),
            ("month_choices", print_month_choices),
            ("year_choices", print_year_choices),
        ];
        Self {
            actions: builtins.into_iter().collect(),
        }
    }

    pub fn register(&mut self, name: &'static str, action: Action) -> Result<(), RegistryError> {
        if self.actions.contains_key(name) {
            return Err(RegistryError::Duplicate(name.to_string()));
        }
        self.actions.insert(name, action);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<Action, RegistryError> {
        self.actions
            .get(name)
            .copied()
            .ok_or_else(|| RegistryError::Unknown {
                name: name.to_string(),
                known: self.names().join(", "),
            })
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.actions.keys().copied().collect()
    }

    pub fn call(&self, name: &str, out: &mut dyn Write) -> anyhow::Result<()> {
        let action = self.get(name)?;
        debug!(name, "calling registered function");
        action(out)
    }
}

fn print_lookups(out: &mut dyn Write) -> anyhow::Result<()> {
    for lookup in Lookup::ALL {
        writeln!(out, "{lookup}")?;
    }
    Ok(())
}

fn print_month_choices(out: &mut dyn Write) -> anyhow::Result<()> {
    write_choices(out, &month_choices(None))
}

fn print_year_choices(out: &mut dyn Write) -> anyhow::Result<()> {
    let (start, end) = DEFAULT_YEAR_RANGE;
    write_choices(out, &year_choices(Local::now().date_naive(), start, end, None))
}

fn write_choices(out: &mut dyn Write, choices: &[Choice]) -> anyhow::Result<()> {
    for choice in choices {
        writeln!(out, "{}\t{}", choice.value, choice.label)?;
    }
    Ok(())
}
