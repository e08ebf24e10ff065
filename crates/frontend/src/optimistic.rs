/// A locally displayed value that may run ahead of the server.
///
/// [`apply`](Optimistic::apply) changes the value immediately and keeps a
/// snapshot of what was shown before. The pending change is then either
/// confirmed with the server's answer or rolled back to the snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Optimistic<T> {
    current: T,
    snapshot: Option<T>,
}

impl<T: Clone> Optimistic<T> {
    pub fn new(value: T) -> Self {
        Self {
            current: value,
            snapshot: None,
        }
    }

    pub fn get(&self) -> &T {
        &self.current
    }

    pub fn is_pending(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Applies `change` locally. A change applied while another one is
    /// pending keeps the older snapshot.
    pub fn apply<F: FnOnce(&mut T)>(&mut self, change: F) {
        if self.snapshot.is_none() {
            self.snapshot = Some(self.current.clone());
        }
        change(&mut self.current);
    }

    /// Replaces the value with what the server confirmed.
    pub fn commit(&mut self, confirmed: T) {
        self.current = confirmed;
        self.snapshot = None;
    }

    /// Restores the value shown before the pending change.
    pub fn rollback(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            self.current = snapshot;
        }
    }
}
