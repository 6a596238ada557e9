use host_kernel::{HostIntrospect, HostKernel};

/// A host connection usable both for topology queries and for building.
///
/// The pipeline resolves the shaft frame through `as_introspect` and then
/// builds through `as_kernel`, so one `&mut dyn KernelBundle` serves both
/// phases without holding two borrows of the host at once.
pub trait KernelBundle: HostKernel + HostIntrospect {
    fn as_introspect(&self) -> &dyn HostIntrospect;
    fn as_kernel(&mut self) -> &mut dyn HostKernel;
}

impl<T: HostKernel + HostIntrospect> KernelBundle for T {
    fn as_introspect(&self) -> &dyn HostIntrospect {
        self
    }

    fn as_kernel(&mut self) -> &mut dyn HostKernel {
        self
    }
}
