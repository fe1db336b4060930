//! Names of the implicitly declared system build arguments.

pub const HOST_OS: &str = "host_os";
pub const HOST_CPU: &str = "host_cpu";
pub const CURRENT_OS: &str = "current_os";
pub const CURRENT_CPU: &str = "current_cpu";
pub const TARGET_OS: &str = "target_os";
pub const TARGET_CPU: &str = "target_cpu";

/// Every name seeded into a root scope, in seeding order.
pub const SYSTEM_VARS: [&str; 6] = [
    HOST_OS, CURRENT_OS, TARGET_OS, HOST_CPU, CURRENT_CPU, TARGET_CPU,
];
