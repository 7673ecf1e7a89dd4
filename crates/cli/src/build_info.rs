use std::env::consts;
use std::fmt::Display;

/// The version line printed by `--version`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BuildInfo {
    pub(crate) version: &'static str,
    pub(crate) os: &'static str,
    pub(crate) arch: &'static str,
}

impl BuildInfo {
    pub(crate) fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            os: consts::OS,
            arch: consts::ARCH,
        }
    }
}

impl Display for BuildInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "promplot {} {} {}", self.version, self.os, self.arch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let build = BuildInfo {
            version: "1.2.0",
            os: "linux",
            arch: "x86_64",
        };

        assert_eq!(build.to_string(), "promplot 1.2.0 linux x86_64");
    }
}
