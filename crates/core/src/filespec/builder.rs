//! Descriptor builder: positional zip of reconciled sequences.

use std::path::Path;
use tracing::warn;

use super::reconcile::FileLists;
use super::types::{FileSpec, FileType};

/// Zip the reconciled sequences into one input descriptor per index.
///
/// No cross-field validation happens here; a descriptor with an unknown size
/// or an odd flag token is still built. When the sequences disagree on length
/// the mismatch is logged and descriptors are built up to the shortest one.
pub fn build_file_specs(lists: &FileLists, workdir: &Path) -> Vec<FileSpec> {
    if !lists.is_uniform() {
        warn!(
            "file lists not same length: len(lfns)={}, len(scopes)={}, building {} descriptor(s)",
            lists.lfns.len(),
            lists.scopes.len(),
            lists.shortest_len()
        );
    }

    let n = lists.shortest_len();
    (0..n)
        .map(|i| FileSpec {
            filetype: FileType::Input,
            scope: lists.scopes[i].clone(),
            lfn: lists.lfns[i].clone(),
            guid: lists.guids[i].clone(),
            filesize: lists.filesizes[i],
            checksum: lists.checksums[i].clone(),
            allow_lan: lists.allowlans[i].clone(),
            allow_wan: lists.allowwans[i].clone(),
            direct_access_lan: lists.directaccesslans[i].clone(),
            direct_access_wan: lists.directaccesswans[i].clone(),
            is_tar: lists.istars[i].clone(),
            accessmode: lists.accessmodes[i].clone(),
            storage_token: lists.storagetokens[i].clone(),
            workdir: workdir.to_path_buf(),
            status: None,
            status_code: None,
            turl: None,
        })
        .collect()
}
