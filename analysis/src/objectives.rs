use std::borrow::Cow;

// Structure and objective npc ids as reported in `towerDeaths[].npcId`
pub static OBJECTIVES: phf::Map<i64, &'static str> = phf::phf_map! {
    133_i64 => "Roshan",
    134_i64 => "Roshan (Halloween)",
    135_i64 => "Roshan Minion (seasonal)",

    16_i64 => "Radiant Tower T1 Top",
    17_i64 => "Radiant Tower T1 Mid",
    18_i64 => "Radiant Tower T1 Bot",
    19_i64 => "Radiant Tower T2 Top",
    20_i64 => "Radiant Tower T2 Mid",
    21_i64 => "Radiant Tower T2 Bot",
    22_i64 => "Radiant Tower T3 Top",
    23_i64 => "Radiant Tower T3 Mid",
    24_i64 => "Radiant Tower T3 Bot",
    25_i64 => "Radiant Tower T4",

    26_i64 => "Dire Tower T1 Top",
    27_i64 => "Dire Tower T1 Mid",
    28_i64 => "Dire Tower T1 Bot",
    29_i64 => "Dire Tower T2 Top",
    30_i64 => "Dire Tower T2 Mid",
    31_i64 => "Dire Tower T2 Bot",
    32_i64 => "Dire Tower T3 Top",
    33_i64 => "Dire Tower T3 Mid",
    34_i64 => "Dire Tower T3 Bot",
    35_i64 => "Dire Tower T4",

    38_i64 => "Radiant Melee Rax Top",
    39_i64 => "Radiant Melee Rax Mid",
    40_i64 => "Radiant Melee Rax Bot",
    41_i64 => "Radiant Range Rax Top",
    42_i64 => "Radiant Range Rax Mid",
    43_i64 => "Radiant Range Rax Bot",

    44_i64 => "Dire Melee Rax Top",
    45_i64 => "Dire Melee Rax Mid",
    46_i64 => "Dire Melee Rax Bot",
    47_i64 => "Dire Range Rax Top",
    48_i64 => "Dire Range Rax Mid",
    49_i64 => "Dire Range Rax Bot",

    50_i64 => "Radiant Ancient",
    51_i64 => "Dire Ancient",

    822_i64 => "Watch Tower",
    864_i64 => "Twin Gate",
    888_i64 => "Lotus Pool",
    861_i64 => "Tormentor",
    890_i64 => "Tormentor Minion (ignore for kill attribution)",
};

pub fn lookup(npc_id: i64) -> Option<&'static str> {
    OBJECTIVES.get(&npc_id).copied()
}

/// Human readable name for an objective, `npc#<id>` for anything not in the catalog.
pub fn label(npc_id: i64) -> Cow<'static, str> {
    match lookup(npc_id) {
        Some(name) => Cow::Borrowed(name),
        None => Cow::Owned(format!("npc#{}", npc_id)),
    }
}
