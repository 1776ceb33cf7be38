//! Card brand detection from the leading digits of a card number.
//!
//! The table is checked top to bottom and the first match wins. Several
//! patterns overlap (Visa Dankort before Visa, Mastercard before Maestro),
//! so the order is significant and must not be sorted.

use std::fmt;
use std::sync::LazyLock;

use regex::{RegexSet, RegexSetBuilder};

/// A payment card network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardBrand {
    Mastercard,
    VisaDankort,
    Visa,
    Amex,
    Diners,
    MaestroUk,
    Solo,
    Laser,
    Discover,
    Jcb,
    Bcmc,
    Bijcard,
    Dankort,
    Hiper,
    Cup,
    Maestro,
    Elo,
    Uatp,
    CarteBancaire,
    VisaAlphaBankBonus,
    McAlphaBankBonus,
    Oasis,
    KarenMillen,
    Warehouse,
    Mir,
    Codensa,
    Naranja,
    Cabal,
    Shopping,
    ArgenCard,
    Troy,
    Forbrugsforeningen,
    Vpay,
    Rupay,
    /// No pattern matched.
    Unknown,
}

impl CardBrand {
    /// Brand tag, e.g. `"mastercard"` or `"unknown"`.
    pub fn as_str(self) -> &'static str {
        match self {
            CardBrand::Mastercard => "mastercard",
            CardBrand::Unknown => "unknown",
            other => other.gateway_code(),
        }
    }

    /// The code the gateway uses for this brand in API requests.
    ///
    /// Identical to [`as_str`](Self::as_str) except for Mastercard (`"mc"`)
    /// and the no-match case (`"noBrand"`).
    pub fn gateway_code(self) -> &'static str {
        match self {
            CardBrand::Mastercard => "mc",
            CardBrand::VisaDankort => "visadankort",
            CardBrand::Visa => "visa",
            CardBrand::Amex => "amex",
            CardBrand::Diners => "diners",
            CardBrand::MaestroUk => "maestrouk",
            CardBrand::Solo => "solo",
            CardBrand::Laser => "laser",
            CardBrand::Discover => "discover",
            CardBrand::Jcb => "jcb",
            CardBrand::Bcmc => "bcmc",
            CardBrand::Bijcard => "bijcard",
            CardBrand::Dankort => "dankort",
            CardBrand::Hiper => "hiper",
            CardBrand::Cup => "cup",
            CardBrand::Maestro => "maestro",
            CardBrand::Elo => "elo",
            CardBrand::Uatp => "uatp",
            CardBrand::CarteBancaire => "cartebancaire",
            CardBrand::VisaAlphaBankBonus => "visaalphabankbonus",
            CardBrand::McAlphaBankBonus => "mcalphabankbonus",
            CardBrand::Oasis => "oasis",
            CardBrand::KarenMillen => "karenmillen",
            CardBrand::Warehouse => "warehouse",
            CardBrand::Mir => "mir",
            CardBrand::Codensa => "codensa",
            CardBrand::Naranja => "naranja",
            CardBrand::Cabal => "cabal",
            CardBrand::Shopping => "shopping",
            CardBrand::ArgenCard => "argencard",
            CardBrand::Troy => "troy",
            CardBrand::Forbrugsforeningen => "forbrugsforeningen",
            CardBrand::Vpay => "vpay",
            CardBrand::Rupay => "rupay",
            CardBrand::Unknown => "noBrand",
        }
    }
}

impl fmt::Display for CardBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priority-ordered `(pattern, brand)` table.
const BRAND_PATTERNS: &[(&str, CardBrand)] = &[
    (r"^(5[1-5]\d{0,14}|2[2-7]\d{0,14})$", CardBrand::Mastercard),
    (r"^(4571)\d{0,12}$", CardBrand::VisaDankort),
    (r"^4\d{0,18}$", CardBrand::Visa),
    (r"^3[47]\d{0,13}$", CardBrand::Amex),
    (r"^(36)\d{0,12}$", CardBrand::Diners),
    (r"^(6759)\d{0,15}$", CardBrand::MaestroUk),
    (r"^(6767)\d{0,15}$", CardBrand::Solo),
    (r"^(6304|6706|6709|6771)\d{0,15}$", CardBrand::Laser),
    (
        r"^(6011\d{0,12}|(644|645|646|647|648|649)\d{0,13}|65\d{0,14})$",
        CardBrand::Discover,
    ),
    (r"^(352[8,9]\d{0,15}|35[4-8]\d{0,16})$", CardBrand::Jcb),
    (r"^((6703)\d{0,15}|(479658|606005)\d{0,13})$", CardBrand::Bcmc),
    (r"^(5100081)\d{0,9}$", CardBrand::Bijcard),
    (r"^(5019)\d{0,12}$", CardBrand::Dankort),
    (r"^(606282)\d{0,10}$", CardBrand::Hiper),
    (r"^(62|81)\d{0,17}$", CardBrand::Cup),
    (r"^(5[0|6-8]\d{0,17}|6\d{0,18})$", CardBrand::Maestro),
    (
        r"^((((506699)|(506770)|(506771)|(506772)|(506773)|(506774)|(506775)|(506776)|(506777)|(506778)|(401178)|(438935)|(451416)|(457631)|(457632)|(504175)|(627780)|(636368)|(636297))\d{0,10})|((50676)|(50675)|(50674)|(50673)|(50672)|(50671)|(50670))\d{0,11})$",
        CardBrand::Elo,
    ),
    (r"^1\d{0,14}$", CardBrand::Uatp),
    (r"^[4-6]\d{0,15}$", CardBrand::CarteBancaire),
    (r"^(450903)\d{0,10}$", CardBrand::VisaAlphaBankBonus),
    (r"^(510099)\d{0,10}$", CardBrand::McAlphaBankBonus),
    (r"^(637095|637568|637599|637609|637612)\d{0,10}$", CardBrand::Hiper),
    (r"^(982616)\d{0,10}$", CardBrand::Oasis),
    (r"^(98261465)\d{0,8}$", CardBrand::KarenMillen),
    (r"^(982633)\d{0,10}$", CardBrand::Warehouse),
    (r"^(220)\d{0,16}$", CardBrand::Mir),
    (r"^(590712)\d{0,10}$", CardBrand::Codensa),
    (r"^(37|40|5[28])([279])\d*$", CardBrand::Naranja),
    (r"^(58|6[03])([03469])\d*$", CardBrand::Cabal),
    (r"^(27|58|60)([39])\d*$", CardBrand::Shopping),
    (r"^(50)(1)\d*$", CardBrand::ArgenCard),
    (r"^(97)(9)\d*$", CardBrand::Troy),
    (r"^(60)(0)\d*$", CardBrand::Forbrugsforeningen),
    (
        r"^(40[1,8]|413|43[4,5]|44[1,23467]|45[5,8]|46[0,136]|47[1,9]|48[2,37])\d{0,16}$",
        CardBrand::Vpay,
    ),
    (
        r"^(100003|508(2|[5-9])|60(69|[7-8])|652(1[5-9]|[2-5]\d|8[5-9])|65300[3-4]|8172([0-1]|[3-5]|7|9)|817(3[3-8]|40[6-9]|410)|35380([0-2]|[5-6]|9))\d{0,12}$",
        CardBrand::Rupay,
    ),
];

// Unicode mode off: `\d` must mean ASCII `[0-9]` only.
static BRAND_SET: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSetBuilder::new(BRAND_PATTERNS.iter().map(|(pattern, _)| *pattern))
        .unicode(false)
        .build()
        .expect("card brand patterns are valid regular expressions")
});

/// Detect the brand of a digits-only card number.
///
/// Input containing spaces or other separators will not match; strip them
/// first. Returns [`CardBrand::Unknown`] when nothing matches.
pub fn detect_brand(digits: &str) -> CardBrand {
    BRAND_SET
        .matches(digits)
        .into_iter()
        .next()
        .map_or(CardBrand::Unknown, |index| BRAND_PATTERNS[index].1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_mastercard() {
        assert_eq!(detect_brand("5123459046058920"), CardBrand::Mastercard);
        assert_eq!(detect_brand("5123459046058920").as_str(), "mastercard");
        assert_eq!(detect_brand("5123459046058920").gateway_code(), "mc");
    }

    #[test]
    fn detects_visa() {
        assert_eq!(detect_brand("4000180000000002").as_str(), "visa");
        assert_eq!(detect_brand("4111111111111111"), CardBrand::Visa);
    }

    #[test]
    fn unknown_for_unmatched() {
        assert_eq!(detect_brand("0000000000000000").as_str(), "unknown");
        assert_eq!(detect_brand("0000000000000000").gateway_code(), "noBrand");
        assert_eq!(detect_brand(""), CardBrand::Unknown);
    }

    #[test]
    fn specific_visa_variant_beats_generic_visa() {
        assert_eq!(detect_brand("4571000000000001"), CardBrand::VisaDankort);
    }

    #[test]
    fn mastercard_range_beats_maestro() {
        // 55... is inside the Mastercard range, which is checked before Maestro.
        assert_eq!(detect_brand("5500000000000004"), CardBrand::Mastercard);
        assert_eq!(detect_brand("5000000000000009"), CardBrand::Maestro);
    }

    #[test]
    fn common_brands() {
        assert_eq!(detect_brand("378282246310005"), CardBrand::Amex);
        assert_eq!(detect_brand("36006666333344"), CardBrand::Diners);
        assert_eq!(detect_brand("6011111111111117"), CardBrand::Discover);
        assert_eq!(detect_brand("3569990010095841"), CardBrand::Jcb);
        assert_eq!(detect_brand("6703444444444449"), CardBrand::Bcmc);
        assert_eq!(detect_brand("6250941006528599"), CardBrand::Cup);
    }

    #[test]
    fn spaces_do_not_match() {
        assert_eq!(detect_brand("4111 1111 1111 1111"), CardBrand::Unknown);
    }

    #[test]
    fn non_ascii_digits_do_not_match() {
        // '4' followed by Arabic-Indic digit one (U+0661).
        let number: String = std::iter::once('4')
            .chain(std::iter::repeat('\u{0661}').take(15))
            .collect();
        assert_eq!(detect_brand(&number), CardBrand::Unknown);
        assert_eq!(detect_brand("\u{0665}123459046058920"), CardBrand::Unknown);
    }

    #[test]
    fn every_pattern_compiles() {
        assert_eq!(BRAND_SET.len(), BRAND_PATTERNS.len());
    }
}
