//! List reconciler: comma-separated parallel strings to typed sequences.

use tracing::{debug, warn};

use super::types::FlagValue;

/// The raw comma-joined fields as received on the command line.
///
/// Fields are optional so that an absent input degrades the whole batch to
/// empty sequences instead of failing the run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawFileLists<'a> {
    pub lfns: Option<&'a str>,
    pub scopes: Option<&'a str>,
    pub filesizes: Option<&'a str>,
    pub checksums: Option<&'a str>,
    pub allowlans: Option<&'a str>,
    pub allowwans: Option<&'a str>,
    pub directaccesslans: Option<&'a str>,
    pub directaccesswans: Option<&'a str>,
    pub istars: Option<&'a str>,
    pub accessmodes: Option<&'a str>,
    pub storagetokens: Option<&'a str>,
    pub guids: Option<&'a str>,
}

/// The reconciled, typed per-file sequences.
#[derive(Debug, Clone, Default)]
pub struct FileLists {
    pub lfns: Vec<String>,
    pub scopes: Vec<String>,
    pub filesizes: Vec<Option<u64>>,
    pub checksums: Vec<String>,
    pub allowlans: Vec<FlagValue>,
    pub allowwans: Vec<FlagValue>,
    pub directaccesslans: Vec<FlagValue>,
    pub directaccesswans: Vec<FlagValue>,
    pub istars: Vec<FlagValue>,
    pub accessmodes: Vec<String>,
    pub storagetokens: Vec<String>,
    pub guids: Vec<String>,
}

impl FileLists {
    /// Reconcile the raw fields into typed sequences.
    ///
    /// Any absent field is a recoverable degradation: the mismatch is logged
    /// and ALL sequences come back empty, so the run continues and produces an
    /// essentially empty report.
    pub fn reconcile(raw: &RawFileLists<'_>) -> FileLists {
        let required = [
            ("lfns", raw.lfns),
            ("scopes", raw.scopes),
            ("filesizes", raw.filesizes),
            ("checksums", raw.checksums),
            ("allowlans", raw.allowlans),
            ("allowwans", raw.allowwans),
            ("directaccesslans", raw.directaccesslans),
            ("directaccesswans", raw.directaccesswans),
            ("istars", raw.istars),
            ("accessmodes", raw.accessmodes),
            ("storagetokens", raw.storagetokens),
            ("guids", raw.guids),
        ];
        if let Some((name, _)) = required.iter().find(|(_, v)| v.is_none()) {
            warn!("file list field '{}' is absent, degrading to empty lists", name);
            return FileLists::default();
        }

        let lists = FileLists {
            lfns: split(raw.lfns.unwrap_or_default()),
            scopes: split(raw.scopes.unwrap_or_default()),
            filesizes: coerce_sizes(&split(raw.filesizes.unwrap_or_default())),
            checksums: split(raw.checksums.unwrap_or_default()),
            allowlans: coerce_flags(&split(raw.allowlans.unwrap_or_default())),
            allowwans: coerce_flags(&split(raw.allowwans.unwrap_or_default())),
            directaccesslans: coerce_flags(&split(raw.directaccesslans.unwrap_or_default())),
            directaccesswans: coerce_flags(&split(raw.directaccesswans.unwrap_or_default())),
            istars: coerce_flags(&split(raw.istars.unwrap_or_default())),
            accessmodes: split(raw.accessmodes.unwrap_or_default()),
            storagetokens: split(raw.storagetokens.unwrap_or_default()),
            guids: split(raw.guids.unwrap_or_default()),
        };

        debug!("lfns={:?}", lists.lfns);
        debug!("scopes={:?}", lists.scopes);
        debug!("filesizes={:?}", lists.filesizes);
        debug!("checksums={:?}", lists.checksums);
        debug!("allowlans={:?}", lists.allowlans);
        debug!("allowwans={:?}", lists.allowwans);
        debug!("directaccesslans={:?}", lists.directaccesslans);
        debug!("directaccesswans={:?}", lists.directaccesswans);
        debug!("istars={:?}", lists.istars);
        debug!("accessmodes={:?}", lists.accessmodes);
        debug!("storagetokens={:?}", lists.storagetokens);
        debug!("guids={:?}", lists.guids);

        lists
    }

    fn lengths(&self) -> [usize; 12] {
        [
            self.lfns.len(),
            self.scopes.len(),
            self.filesizes.len(),
            self.checksums.len(),
            self.allowlans.len(),
            self.allowwans.len(),
            self.directaccesslans.len(),
            self.directaccesswans.len(),
            self.istars.len(),
            self.accessmodes.len(),
            self.storagetokens.len(),
            self.guids.len(),
        ]
    }

    /// Length of the shortest sequence; descriptors are built up to here.
    pub fn shortest_len(&self) -> usize {
        self.lengths().into_iter().min().unwrap_or(0)
    }

    /// Whether all twelve sequences have the same length.
    pub fn is_uniform(&self) -> bool {
        let lengths = self.lengths();
        lengths.iter().all(|&l| l == lengths[0])
    }
}

fn split(joined: &str) -> Vec<String> {
    joined.split(',').map(str::to_string).collect()
}

/// Integer coercion: a token that fails to parse becomes `None`, never an
/// error, so the sequence keeps its length.
pub fn coerce_sizes(tokens: &[String]) -> Vec<Option<u64>> {
    tokens.iter().map(|t| t.parse::<u64>().ok()).collect()
}

/// Boolean coercion per the token table on [`FlagValue`].
pub fn coerce_flags(tokens: &[String]) -> Vec<FlagValue> {
    tokens.iter().map(|t| FlagValue::parse(t)).collect()
}
