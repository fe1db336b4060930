//! Host platform detection for the system build arguments.

use std::env::consts;

/// Canonical name seeded as `host_os`.
///
/// Panics when the build host is not in the supported table; an unsupported
/// host is a porting gap, not a user error.
pub fn host_os() -> &'static str {
    match host_os_for(consts::OS) {
        Some(os) => os,
        None => panic!("host OS not handled: {}", consts::OS),
    }
}

/// Canonical name seeded as `host_cpu`, derived from the host architecture.
pub fn host_cpu() -> &'static str {
    match host_cpu_for_arch(consts::ARCH) {
        Some(arch) => arch,
        None => panic!("host architecture not handled: {}", consts::ARCH),
    }
}

/// Maps a platform OS identifier to its canonical `host_os` spelling.
pub fn host_os_for(os: &str) -> Option<&'static str> {
    Some(match os {
        "windows" | "win" => "win",
        "macos" | "mac" => "mac",
        "linux" => "linux",
        "freebsd" => "freebsd",
        "aix" => "aix",
        "openbsd" => "openbsd",
        "haiku" => "haiku",
        "solaris" => "solaris",
        "netbsd" => "netbsd",
        "zos" => "zos",
        "serenity" => "serenity",
        _ => return None,
    })
}

/// Maps an architecture spelling to its canonical `host_cpu` name.
///
/// Accepts both uname-style and Rust-target spellings, since callers feed it
/// whichever the platform reports.
pub fn host_cpu_for_arch(arch: &str) -> Option<&'static str> {
    Some(match arch {
        "x86" | "BePC" => "x86",
        "x86_64" => "x64",
        "aarch64" | "arm64" => "arm64",
        "mips" => "mipsel",
        "mips64" => "mips64el",
        "s390x" => "s390x",
        "ppc64" | "ppc64le" | "powerpc64" => "ppc64",
        "riscv32" => "riscv32",
        "riscv64" => "riscv64",
        "e2k" => "e2k",
        "loongarch64" | "loong64" => "loong64",
        other if other.starts_with("arm") => "arm",
        _ => return None,
    })
}
