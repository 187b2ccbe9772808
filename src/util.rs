use std::ptr::NonNull;

/// Moves `node` onto the heap and hands back an owning raw handle to it. The handle must
/// eventually be passed to [`reclaim`] exactly once.
pub(crate) fn leak_boxed<N>(node: N) -> NonNull<N> {
    NonNull::from(Box::leak(Box::new(node)))
}

/// Takes back ownership of a node allocated by [`leak_boxed`].
///
/// # Safety
///
/// `node` must come from [`leak_boxed`], must not have been reclaimed already, and nothing may
/// dereference it after this call.
pub(crate) unsafe fn reclaim<N>(node: NonNull<N>) -> N {
    *Box::from_raw(node.as_ptr())
}
