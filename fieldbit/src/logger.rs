use chrono::Local;
use std::fmt;

fn emit(level: &str, args: fmt::Arguments) {
    println!("[{}] {} {}", Local::now().format("%Y-%m-%d %H:%M:%S"), level, args);
}

pub fn info(args: fmt::Arguments) {
    emit("INFO", args);
}

pub fn warn(args: fmt::Arguments) {
    emit("WARN", args);
}

pub fn error(args: fmt::Arguments) {
    emit("ERROR", args);
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::logger::info(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::logger::warn(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::logger::error(format_args!($($arg)*))
    };
}
