use thiserror::Error;

/// Failures reported by the container operations.
///
/// Only conditions that are errors for the caller live here. An empty
/// [`LinkedQueue`](crate::LinkedQueue) answers `poll` with `None` and a
/// duplicate [`BinarySearchTree`](crate::BinarySearchTree) insert returns
/// `false`; neither goes through this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContainerError {
    #[error("index {index} out of bounds for size {size}")]
    IndexOutOfBounds { index: usize, size: usize },

    #[error("pop from an empty stack")]
    EmptyStack,
}

pub type Result<T> = std::result::Result<T, ContainerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_out_of_bounds_message() {
        let err = ContainerError::IndexOutOfBounds { index: 4, size: 2 };
        assert_eq!(err.to_string(), "index 4 out of bounds for size 2");
    }

    #[test]
    fn empty_stack_message() {
        assert_eq!(ContainerError::EmptyStack.to_string(), "pop from an empty stack");
    }
}
