//! Diagnostics on stderr.

//! `warn!` always prints. `trace!` only prints if tracing is enabled,
//! either via the `ACOMPONENT_TRACE` env var (read once) or
//! `set_trace(true)`. Both can be compiled out by prefixing their
//! names with `no`.

use std::{io::{BufWriter, Write},
          sync::atomic::{AtomicBool, Ordering}};

use lazy_static::lazy_static;

pub const TRACE_ENV_VAR: &str = "ACOMPONENT_TRACE";

fn env_flag(name: &str) -> bool {
    match std::env::var_os(name) {
        Some(v) => match v.to_str() {
            Some("0") | Some("") | Some("off") | Some("false") | Some("no") => false,
            _ => true
        }
        None => false
    }
}

lazy_static!{
    static ref TRACE: AtomicBool = AtomicBool::new(env_flag(TRACE_ENV_VAR));
}

/// Enable or disable `trace!` output, overriding the env var.
pub fn set_trace(on: bool) {
    TRACE.store(on, Ordering::Relaxed)
}

pub fn trace_enabled() -> bool {
    TRACE.load(Ordering::Relaxed)
}


/// Write one diagnostic line to stderr; use via `warn!`/`trace!`.
#[doc(hidden)]
pub fn report(tag: char, message: std::fmt::Arguments, file: &str, line: u32) {
    let mut outp = BufWriter::new(std::io::stderr().lock());
    let _ = writeln!(outp, "{tag}: {message} at {file:?} line {line}");
    let _ = outp.flush();
}

#[macro_export]
macro_rules! warn {
    ($($fmt:tt)*) => {
        $crate::trace::report('W', format_args!($($fmt)*), file!(), line!())
    }
}

#[macro_export]
macro_rules! nowarn {
    ($($fmt:tt)*) => {}
}

#[macro_export]
macro_rules! trace {
    ($($fmt:tt)*) => {
        if $crate::trace::trace_enabled() {
            $crate::trace::report('T', format_args!($($fmt)*), file!(), line!())
        }
    }
}

#[macro_export]
macro_rules! notrace {
    ($($fmt:tt)*) => {}
}
