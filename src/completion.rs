/// Candidates collected from the completion callback during one Tab cycle.
///
/// The set is transient: built when Tab is pressed, dropped when the cycle
/// ends, whatever the outcome.
#[derive(Debug, Default)]
pub struct Completions {
    items: Vec<String>,
}

impl Completions {
    pub(crate) fn new() -> Self {
        Completions { items: Vec::new() }
    }

    /// Append one candidate. Called by the host's callback.
    pub fn add(&mut self, candidate: impl Into<String>) {
        self.items.push(candidate.into());
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn get(&self, i: usize) -> Option<&str> {
        self.items.get(i).map(String::as_str)
    }
}

/// Host-supplied callback: inspect the line so far, add candidates.
pub type CompletionCallback = dyn Fn(&str, &mut Completions);
