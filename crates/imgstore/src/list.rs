// Copyright 2026 imgstore contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::Serialize;

use crate::store::Store;

#[derive(Debug, Serialize)]
pub struct ImageList {
    #[serde(rename = "Images")]
    pub images: Vec<String>,
}

/// Collects the ids of all valid slots, in slot-table order.
pub fn list_ids(store: &Store) -> Vec<String> {
    store
        .slots()
        .iter()
        .filter(|s| s.is_valid())
        .map(|s| s.img_id_str())
        .collect()
}

pub fn list_json(store: &Store) -> serde_json::Result<String> {
    serde_json::to_string(&ImageList {
        images: list_ids(store),
    })
}

/// Renders the store as a human-readable listing, matching the original's
/// `do_list_stdout` trailer text exactly.
pub fn list_stdout(store: &Store) -> String {
    let header = store.header();
    let mut out = String::new();
    out.push_str("*****ImgStore header*****\n");
    out.push_str(&format!("TYPE: {}\n", header.name_str()));
    out.push_str(&format!("VERSION: {}\n", header.version));
    out.push_str(&format!("IMAGE COUNT: {}\t\tMAX IMAGES: {}\n", header.num_files, header.max_files));
    out.push_str(&format!(
        "THUMBNAIL: {} x {}\tSMALL: {} x {}\n",
        header.res_resized[0], header.res_resized[1], header.res_resized[2], header.res_resized[3]
    ));
    out.push_str("*****************************\n");

    if header.num_files == 0 {
        out.push_str("<< empty imgStore >>\n");
        return out;
    }

    for slot in store.slots().iter().filter(|s| s.is_valid()) {
        out.push_str(&format!("IMAGE ID: {}\n", slot.img_id_str()));
        out.push_str(&format!("SHA: {}\n", hex_encode(&slot.sha)));
        out.push_str(&format!(
            "VALID: {}\nOFFSET ORIG.: {}\t\tSIZE ORIG.: {}\n",
            slot.is_valid, slot.offset[2], slot.size[2]
        ));
        out.push_str(&format!(
            "OFFSET THUMB.: {}\t\tSIZE THUMB.: {}\n",
            slot.offset[0], slot.size[0]
        ));
        out.push_str(&format!(
            "OFFSET SMALL.: {}\t\tSIZE SMALL.: {}\n",
            slot.offset[1], slot.size[1]
        ));
        out.push_str(&format!(
            "ORIGINAL: {} x {}\n",
            slot.res_orig[0], slot.res_orig[1]
        ));
        out.push_str("*****************************\n");
    }
    out
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
