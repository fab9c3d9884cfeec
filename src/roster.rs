use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use crate::bitmask::{CanRepresentLetterBitmask, LetterBitmask};
use crate::error::RosterError;

/// Shared pointer to a candidate. Teams hold these, so recording a team is a
/// handful of pointer clones.
pub type CandidatePtr = Arc<Candidate>;

/// A selectable roster entry: the normalized name and its letter bitmask.
#[derive(Debug)]
pub struct Candidate {
    name: String,
    letters: LetterBitmask,
}

impl Candidate {
    /// Normalize a raw name and derive its letter bitmask.
    pub fn new(raw: &str) -> Self {
        let name = normalize(raw);
        let letters = LetterBitmask::compute_bitmask(name.chars());

        Candidate { name, letters }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn letters(&self) -> LetterBitmask {
        self.letters
    }
}

/// Lowercase `raw` and strip everything that is not an ASCII letter.
///
/// A name may normalize to the empty string; the resulting candidate carries
/// an empty mask but still occupies a team slot when selected.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .map(|ch| ch.to_ascii_lowercase())
        .filter(char::is_ascii_alphabetic)
        .collect()
}

/// The full list of selectable candidates, in input order.
#[derive(Debug)]
pub struct Roster {
    candidates: Vec<CandidatePtr>,
}

impl Roster {
    /// Build a roster from in-memory names. An empty list is valid and makes
    /// every positive team size unsatisfiable.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let candidates = names
            .into_iter()
            .map(|raw| Arc::new(Candidate::new(raw.as_ref())))
            .collect();

        Roster { candidates }
    }

    /// The roster the binary ships with.
    pub fn builtin() -> Self {
        Roster::from_names(DEFAULT_ROSTER.iter().copied())
    }

    /// Load a roster from a file with one raw name per line. Blank lines and
    /// lines starting with `#` are skipped.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RosterError> {
        let file = File::open(&path)?;

        let mut names: Vec<String> = vec![];
        for line in BufReader::new(file).lines() {
            let line = line?;
            let name = line.trim();
            if name.is_empty() || name.starts_with('#') {
                continue;
            }
            names.push(name.to_string());
        }

        if names.is_empty() {
            return Err(RosterError::Empty {
                path: path.as_ref().to_path_buf(),
            });
        }

        Ok(Roster::from_names(names))
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn candidates(&self) -> &[CandidatePtr] {
        &self.candidates
    }

    pub(crate) fn into_candidates(self) -> Vec<CandidatePtr> {
        self.candidates
    }
}

/// Names bundled into the binary so it runs without a roster file.
pub const DEFAULT_ROSTER: &[&str] = &[
    "aatrox", "ahri", "akali", "akshan", "alistar", "ambessa", "amumu",
    "anivia", "annie", "aphelios", "ashe", "aurelionsol", "aurora", "azir",
    "bard", "belveth", "blitzcrank", "brand", "braum", "briar", "caitlyn",
    "camille", "cassiopeia", "chogath", "corki", "darius", "diana", "draven",
    "drmundo", "ekko", "elise", "evelynn", "ezreal", "fiddlesticks", "fiora",
    "fizz", "galio", "gangplank", "garen", "gnar", "gragas", "graves", "gwen",
    "hecarim", "heimerdinger", "hwei", "illaoi", "irelia", "ivern", "janna",
    "jarvaniv", "jax", "jayce", "jhin", "jinx", "kaisa", "kalista", "karma",
    "karthus", "kassadin", "katarina", "kayle", "kayn", "kennen", "khazix",
    "kindred", "kled", "kogmaw", "ksante", "leblanc", "leesin", "leona",
    "lillia", "lissandra", "lucian", "lulu", "lux", "malphite", "malzahar",
    "maokai", "masteryi", "mel", "milio", "missfortune", "wukong",
    "mordekaiser", "morgana", "naafiri", "nami", "nasus", "nautilus", "neeko",
    "nidalee", "nilah", "nocturne", "nunuandwillump", "olaf", "orianna",
    "ornn", "pantheon", "poppy", "pyke", "qiyana", "quinn", "rakan", "rammus",
    "reksai", "rell", "renataglasc", "renekton", "rengar", "riven", "rumble",
    "ryze", "samira", "sejuani", "senna", "seraphine", "sett", "shaco",
    "shen", "shyvana", "singed", "sion", "sivir", "skarner", "smolder",
    "sona", "soraka", "swain", "sylas", "syndra", "tahmkench", "taliyah",
    "talon", "taric", "teemo", "thresh", "tristana", "trundle", "tryndamere",
    "twistedfate", "twitch", "udyr", "urgot", "varus", "vayne", "veigar",
    "velkoz", "vex", "vi", "viego", "viktor", "vladimir", "volibear",
    "warwick", "xayah", "xerath", "xinzhao", "yasuo", "yone", "yorick",
    "yuumi", "zac", "zed", "zeri", "ziggs", "zilean", "zoe", "zyra",
];
