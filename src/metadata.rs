//! Normalized avatar metadata and the constant default tables.
//!
//! There are two tables and they serve different fallbacks:
//!
//! * [`AvatarMetadata::sample`] replaces the *whole* record when the
//!   container or document is unusable.
//! * [`FIELD_DEFAULTS`] fills individual fields when the VRM extension is
//!   present but a `meta` key is missing.
//!
//! `bones` always comes from the sample record.

use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Placeholder name for a blendshape group that has no `name`.
pub const UNKNOWN_BLENDSHAPE: &str = "Unknown";

pub const SAMPLE_BLENDSHAPES: &[&str] = &[
    "Neutral", "Joy", "Angry", "Sorrow", "Fun", "Blink", "Blink_L", "Blink_R",
];

pub const SAMPLE_BONES: &[&str] = &[
    "Hips",
    "Spine",
    "Chest",
    "Neck",
    "Head",
    "LeftShoulder",
    "LeftUpperArm",
    "LeftLowerArm",
    "LeftHand",
    "RightShoulder",
    "RightUpperArm",
    "RightLowerArm",
    "RightHand",
    "LeftUpperLeg",
    "LeftLowerLeg",
    "LeftFoot",
    "RightUpperLeg",
    "RightLowerLeg",
    "RightFoot",
];

static SAMPLE: LazyLock<AvatarMetadata> = LazyLock::new(|| AvatarMetadata {
    name:                "Mura Mura".into(),
    version:             "0.0".into(),
    author:              "VRoid Studio".into(),
    contact_information: String::new(),
    reference:           String::new(),
    title:               "Sample VRM Model".into(),
    allowed_user_name:   "Everyone".into(),
    violent_usage:       "Disallow".into(),
    sexual_usage:        "Disallow".into(),
    commercial_usage:    "Allow".into(),
    license_type:        "Redistribution_Prohibited".into(),
    blendshapes:         to_owned_list(SAMPLE_BLENDSHAPES),
    bones:               to_owned_list(SAMPLE_BONES),
});

/// Per-field substitutes used when the VRM `meta` object lacks a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDefaults {
    pub name:                &'static str,
    pub version:             &'static str,
    pub author:              &'static str,
    pub contact_information: &'static str,
    pub reference:           &'static str,
    pub title:               &'static str,
    pub allowed_user_name:   &'static str,
    pub violent_usage:       &'static str,
    pub sexual_usage:        &'static str,
    pub commercial_usage:    &'static str,
    pub license_type:        &'static str,
}

pub const FIELD_DEFAULTS: FieldDefaults = FieldDefaults {
    name:                "Unknown",
    version:             "0.0",
    author:              "Unknown",
    contact_information: "",
    reference:           "",
    title:               "Unknown",
    allowed_user_name:   "Unknown",
    violent_usage:       "Unknown",
    sexual_usage:        "Unknown",
    commercial_usage:    "Unknown",
    license_type:        "Unknown",
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarMetadata {
    pub name:                String,
    pub version:             String,
    pub author:              String,
    pub contact_information: String,
    pub reference:           String,
    pub title:               String,
    pub allowed_user_name:   String,
    pub violent_usage:       String,
    pub sexual_usage:        String,
    pub commercial_usage:    String,
    pub license_type:        String,
    /// Expression names in declaration order.
    pub blendshapes:         Vec<String>,
    pub bones:               Vec<String>,
}

impl AvatarMetadata {
    /// The process-wide sample record, built on first use.
    pub fn sample() -> &'static AvatarMetadata {
        &SAMPLE
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

pub(crate) fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
