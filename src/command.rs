use crate::interpreter::Interpreter;
use std::collections::HashMap;
use std::rc::Rc;

/// A registered command.
///
/// Handlers get the interpreter, so they can prompt, print and swap the prompt, plus
/// the tokenized line with the command name at index 0. `Ok` means success; an `Err`
/// is reported to the user and keeps the line out of the history.
pub type Handler = Rc<dyn Fn(&mut Interpreter, &[&str]) -> anyhow::Result<()>>;

/// Mapping from command name to [`Handler`].
///
/// Built up front and handed to [`Interpreter::new`], after which it is read-only.
#[derive(Clone, Default)]
pub struct CommandTable {
    handlers: HashMap<String, Handler>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `name`, replacing any previous handler of that name.
    pub fn insert<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: Fn(&mut Interpreter, &[&str]) -> anyhow::Result<()> + 'static,
    {
        self.handlers.insert(name.into(), Rc::new(handler));
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with<F>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&mut Interpreter, &[&str]) -> anyhow::Result<()> + 'static,
    {
        self.insert(name, handler);
        self
    }

    pub fn get(&self, name: &str) -> Option<Handler> {
        self.handlers.get(name).map(Rc::clone)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for CommandTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandTable")
            .field("commands", &self.names())
            .finish()
    }
}
