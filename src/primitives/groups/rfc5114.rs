//! Published RFC 5114 "Additional Diffie-Hellman Groups for Use with IETF
//! Standards" parameters.

use num_bigint::BigUint;

use crate::{Error, GroupParameters, Result};

/// Named RFC 5114 group presets.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Rfc5114Group {
    /// Section 2.1: 1024-bit MODP group with 160-bit prime order subgroup.
    Modp1024Sub160,
    /// Section 2.3: 2048-bit MODP group with 256-bit prime order subgroup.
    Modp2048Sub256,
}

impl Rfc5114Group {
    /// Configuration name of the preset.
    pub fn name(self) -> &'static str {
        match self {
            Self::Modp1024Sub160 => "rfc5114-1024-160",
            Self::Modp2048Sub256 => "rfc5114-2048-256",
        }
    }

    /// Looks a preset up by its configuration name.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "rfc5114-1024-160" => Ok(Self::Modp1024Sub160),
            "rfc5114-2048-256" => Ok(Self::Modp2048Sub256),
            other => Err(Error::InvalidGroupParameters(format!(
                "Unknown group preset '{other}'"
            ))),
        }
    }

    /// Validated parameters for this preset.
    pub fn parameters(self) -> GroupParameters {
        let (p, q, g) = match self {
            Self::Modp1024Sub160 => (P_1024, Q_160, G_1024),
            Self::Modp2048Sub256 => (P_2048, Q_256, G_2048),
        };
        GroupParameters::from_hex(p, q, g)
            .unwrap_or_else(|e| unreachable!("RFC 5114 constants are valid: {e}"))
    }
}

/// RFC 5114 Appendix A.1 test data for the 1024-bit group.
///
/// `y_test = g^x_test mod p`.
#[derive(Clone, Debug)]
pub struct TestVector {
    /// Secret exponent.
    pub x: BigUint,
    /// Matching public value.
    pub y: BigUint,
}

impl TestVector {
    /// Returns the published `(xA, yA)` pair for [`Rfc5114Group::Modp1024Sub160`].
    pub fn modp1024_sub160() -> Self {
        Self {
            x: parse_constant(X_TEST_1024),
            y: parse_constant(Y_TEST_1024),
        }
    }
}

fn parse_constant(hex: &str) -> BigUint {
    BigUint::parse_bytes(hex.as_bytes(), 16)
        .unwrap_or_else(|| unreachable!("RFC 5114 test constants are valid hex"))
}

const P_1024: &str = "B10B8F96A080E01DDE92DE5EAE5D54EC52C99FBCFB06A3C69A6A9DCA52D23B616073E28675A23D189838EF1E2EE652C013ECB4AEA906112324975C3CD49B83BFACCBDD7D90C4BD7098488E9C219A73724EFFD6FAE5644738FAA31A4FF55BCCC0A151AF5F0DC8B4BD45BF37DF365C1A65E68CFDA76D4DA708DF1FB2BC2E4A4371";

const Q_160: &str = "F518AA8781A8DF278ABA4E7D64B7CB9D49462353";

const G_1024: &str = "A4D1CBD5C3FD34126765A442EFB99905F8104DD258AC507FD6406CFF14266D31266FEA1E5C41564B777E690F5504F213160217B4B01B886A5E91547F9E2749F4D7FBD7D3B9A92EE1909D0D2263F80A76A6A24C087A091F531DBF0A0169B6A28AD662A4D18E73AFA32D779D5918D08BC8858F4DCEF97C2A24855E6EEB22B3B2E5";

const X_TEST_1024: &str = "B9A3B3AE8FEFC1A2930496507086F8455D48943E";

const Y_TEST_1024: &str = "2A853B3D92197501B9015B2DEB3ED84F5E021DCC3E52F109D3273D2B7521281CBABE0E76FF5727FA8ACCE26956BA9A1FCA26F20228D8693FEB10841D84A7360054ECE5A7F5B7A61AD3DFB3C60D2E43106D8727DA37DF9CCE95B478755D06BCEA8F9D45965F75A5F3D1DF3701165FC9E50C4279CEB07F989540AE96D5D88ED776";

const P_2048: &str = "87A8E61DB4B6663CFFBBD19C651959998CEEF608660DD0F25D2CEED4435E3B00E00DF8F1D61957D4FAF7DF4561B2AA3016C3D91134096FAA3BF4296D830E9A7C209E0C6497517ABD5A8A9D306BCF67ED91F9E6725B4758C022E0B1EF4275BF7B6C5BFC11D45F9088B941F54EB1E59BB8BC39A0BF12307F5C4FDB70C581B23F76B63ACAE1CAA6B7902D52526735488A0EF13C6D9A51BFA4AB3AD8347796524D8EF6A167B5A41825D967E144E5140564251CCACB83E6B486F6B3CA3F7971506026C0B857F689962856DED4010ABD0BE621C3A3960A54E710C375F26375D7014103A4B54330C198AF126116D2276E11715F693877FAD7EF09CADB094AE91E1A1597";

const Q_256: &str = "8CF83642A709A097B447997640129DA299B1A47D1EB3750BA308B0FE64F5FBD3";

const G_2048: &str = "3FB32C9B73134D0B2E77506660EDBD484CA7B18F21EF205407F4793A1A0BA12510DBC15077BE463FFF4FED4AAC0BB555BE3A6C1B0C6B47B1BC3773BF7E8C6F62901228F8C28CBB18A55AE31341000A650196F931C77A57F2DDF463E5E9EC144B777DE62AAAB8A8628AC376D282D6ED3864E67982428EBC831D14348F6F2F9193B5045AF2767164E1DFC967C1FB3F2E55A4BD1BFFE83B9C80D052B985D182EA0ADB2A3B7313D3FE14C8484B1E052588B9B7D2BBD2DF016199ECD06E1557CD0915B3353BBB64E0EC377FD028370DF92B52C7891428CDC67EB6184B523D1DB246C32F63078490F00EF8D647D148D47954515E2327CFEF98C582664B4C0F6CC41659";
