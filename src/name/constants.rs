//! Fixed name tables shared with the offline feature pipeline.

/// Honorifics and generational suffixes dropped from either end of a
/// tokenised name.
pub const REMOVABLE_TOKENS: [&str; 15] = [
    "jr", "sr", "ii", "iii", "iv", "v", "phd", "md", "esq", "dr", "mr", "mrs", "ms", "prof",
    "sir",
];

/// Surname particles. The first of these found while scanning a tokenised
/// name pulls itself and every following token into the last-name vector.
pub const SURNAME_PARTICLES: [&str; 27] = [
    "santa", "san", "st", "von", "van", "de", "der", "dello", "vander", "del", "de la", "vom",
    "dela", "de los", "dos", "la", "los", "le", "du", "di", "da", "mac", "al", "abu", "bin",
    "ibn", "della",
];

/// Formal name → known nickname variants, pulled from the training
/// pipeline. Used only for the `has_nickname` flag, never for rendering.
pub const NICKNAME_MAPPINGS: [(&str, &[&str]); 63] = [
    ("alexander", &["alex"]),
    ("andrew", &["andy"]),
    ("anne", &["annie", "nancy"]),
    ("arthur", &["art"]),
    ("benjamin", &["ben"]),
    ("william", &["bill", "will"]),
    ("robert", &["bob", "bobby", "rob"]),
    ("catherine", &["cathy"]),
    ("charles", &["charlie", "chuck"]),
    ("daniel", &["dan", "danny"]),
    ("david", &["dave"]),
    ("donald", &["don"]),
    ("edward", &["ed", "eddie"]),
    ("elizabeth", &["eliza", "liz", "liza"]),
    ("eleanor", &["ellie"]),
    ("francis", &["frank"]),
    ("frederick", &["fred"]),
    ("gerald", &["gary", "jerry"]),
    ("gregory", &["greg"]),
    ("harold", &["harry", "hal"]),
    ("john", &["jack", "johnny"]),
    ("jacob", &["jake"]),
    ("janet", &["jan"]),
    ("jeffrey", &["jeff"]),
    ("jennifer", &["jen", "jenny"]),
    ("james", &["jim", "jimmy"]),
    ("joseph", &["joe", "joey", "jody"]),
    ("jonathan", &["jon"]),
    ("joshua", &["josh"]),
    ("joy", &["joyce"]),
    ("judith", &["judy"]),
    ("katherine", &["kate", "kathy"]),
    ("kenneth", &["ken"]),
    ("lawrence", &["larry"]),
    ("lewis", &["lou"]),
    ("margaret", &["maggie", "marge"]),
    ("martin", &["marty"]),
    ("matthew", &["matt"]),
    ("megan", &["meg"]),
    ("melvin", &["mel"]),
    ("michael", &["mike"]),
    ("nicholas", &["nick"]),
    ("patrick", &["pat"]),
    ("peter", &["pete"]),
    ("philip", &["phil"]),
    ("richard", &["rick", "rich"]),
    ("ronald", &["ron"]),
    ("samuel", &["sam"]),
    ("steven", &["steve"]),
    ("susan", &["sue"]),
    ("theodore", &["ted"]),
    ("terence", &["terry"]),
    ("timothy", &["tim"]),
    ("thomas", &["tom"]),
    ("anthony", &["tony"]),
    ("victor", &["vic"]),
    ("zachary", &["zack", "zak"]),
    ("nastya", &["nastia"]),
    ("douglas", &["doug"]),
    ("mitchell", &["mitch"]),
    ("wesley", &["wes"]),
    ("patricia", &["tricia"]),
    ("rajiv", &["raj"]),
];

/// Looks up the nickname variants for a formal name. Empty when the name
/// is not in the table.
pub fn find_nicknames(formal_name: &str) -> &'static [&'static str] {
    NICKNAME_MAPPINGS
        .iter()
        .find(|(formal, _)| *formal == formal_name)
        .map(|(_, nicknames)| *nicknames)
        .unwrap_or(&[])
}
