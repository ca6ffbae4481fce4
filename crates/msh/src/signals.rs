use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};

extern "C" fn on_interrupt(_: nix::libc::c_int) {}

/// Keeps the shell alive when the user interrupts a foreground pipeline.
///
/// A handler is installed rather than ignoring the signal, so that started
/// programs get the default disposition when they replace their image.
pub(crate) fn install_interrupt_handler() -> nix::Result<()> {
    let action = SigAction::new(
        SigHandler::Handler(on_interrupt),
        SaFlags::SA_RESTART,
        SigSet::empty(),
    );

    // SAFETY: the handler does nothing.
    unsafe { sigaction(Signal::SIGINT, &action) }.map(|_| ())
}
