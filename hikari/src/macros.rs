#[macro_export]
macro_rules! expect {
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(t) => t,
            Err(why) => {
                panic!("{}: {:?}", $msg, why);
            }
        }
    };
}

// Thin wrappers so every record from the library carries the `hikari` target
// regardless of the module it was emitted from.

#[macro_export]
macro_rules! hikari_error {
    ($($arg:tt)+) => {
        $crate::__log::error!(target: "hikari", $($arg)+)
    };
}

#[macro_export]
macro_rules! hikari_warn {
    ($($arg:tt)+) => {
        $crate::__log::warn!(target: "hikari", $($arg)+)
    };
}

#[macro_export]
macro_rules! hikari_info {
    ($($arg:tt)+) => {
        $crate::__log::info!(target: "hikari", $($arg)+)
    };
}

#[macro_export]
macro_rules! hikari_debug {
    ($($arg:tt)+) => {
        $crate::__log::debug!(target: "hikari", $($arg)+)
    };
}

#[macro_export]
macro_rules! hikari_trace {
    ($($arg:tt)+) => {
        $crate::__log::trace!(target: "hikari", $($arg)+)
    };
}
