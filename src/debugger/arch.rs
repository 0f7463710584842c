use once_cell::sync::Lazy;
use regex::Regex;
use strum_macros::Display;

/// Instruction set architectures with a known Objective-C method calling convention.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Display)]
pub enum Architecture {
    /// 32-bit x86, stack based convention.
    #[strum(serialize = "i386")]
    I386,
    /// 64-bit x86, System V register convention.
    #[strum(serialize = "x86_64")]
    X86_64,
    /// 64-bit ARM (AAPCS64).
    #[strum(serialize = "arm64")]
    Arm64,
    /// 32-bit ARM family (armv6, armv7, armv7s, ...).
    #[strum(serialize = "arm32")]
    Arm32,
}

static ARM32_FAMILY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^armv.*$").expect("must compile"));

impl Architecture {
    /// Extract the architecture from a target triple string
    /// (`x86_64-apple-ios-simulator` and the like). The leading triple
    /// component is the only part consulted.
    pub fn from_triple(triple: &str) -> Option<Self> {
        let token = triple.split('-').next().unwrap_or_default();
        match token {
            "i386" => Some(Architecture::I386),
            "x86_64" => Some(Architecture::X86_64),
            "arm64" => Some(Architecture::Arm64),
            _ if ARM32_FAMILY.is_match(token) => Some(Architecture::Arm32),
            _ => None,
        }
    }
}

#[test]
fn test_triple_parsing() {
    struct TestCase {
        triple: &'static str,
        result: Option<Architecture>,
    }
    let cases = [
        TestCase {
            triple: "x86_64-apple-ios-simulator",
            result: Some(Architecture::X86_64),
        },
        TestCase {
            triple: "i386-apple-ios",
            result: Some(Architecture::I386),
        },
        TestCase {
            triple: "arm64-apple-ios",
            result: Some(Architecture::Arm64),
        },
        TestCase {
            triple: "armv7-apple-ios",
            result: Some(Architecture::Arm32),
        },
        TestCase {
            triple: "armv7k-apple-watchos",
            result: Some(Architecture::Arm32),
        },
        TestCase {
            triple: "arm-unknown-linux",
            result: None,
        },
        TestCase {
            triple: "riscv64-unknown-none",
            result: None,
        },
        TestCase {
            triple: "",
            result: None,
        },
    ];

    for tc in cases {
        assert_eq!(Architecture::from_triple(tc.triple), tc.result);
    }
}
