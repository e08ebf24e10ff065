/// Scope functions for method chains.
pub trait LetAlso: Sized {
    /// Passes the value to `f` and returns whatever `f` returns.
    fn let_owned<R, F: FnOnce(Self) -> R>(self, f: F) -> R {
        f(self)
    }

    /// Passes a reference of the value to `f` and returns whatever `f` returns.
    fn let_ref<R, F: FnOnce(&Self) -> R>(&self, f: F) -> R {
        f(self)
    }

    /// Lets `f` modify the value, then returns it.
    fn also<F: FnOnce(&mut Self)>(mut self, f: F) -> Self {
        f(&mut self);
        self
    }
}

impl<T> LetAlso for T {}

#[cfg(test)]
mod tests {
    use super::LetAlso;

    #[test]
    fn chains() {
        let sorted = vec![3, 1, 2].also(|v| v.sort());
        assert_eq!(sorted, vec![1, 2, 3]);
        assert_eq!(sorted.let_ref(|v| v.len()), 3);
        assert_eq!(sorted.let_owned(|v| v.into_iter().sum::<i32>()), 6);
    }
}
