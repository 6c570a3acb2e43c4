use analysis::objectives;
use pretty_assertions::assert_eq;

#[test]
fn towers() {
    assert_eq!("Radiant Tower T3 Top", objectives::label(22));
    assert_eq!("Radiant Tower T1 Top", objectives::label(16));
    assert_eq!("Radiant Tower T4", objectives::label(25));
    assert_eq!("Dire Tower T1 Top", objectives::label(26));
    assert_eq!("Dire Tower T4", objectives::label(35));
}

#[test]
fn barracks_and_ancients() {
    assert_eq!("Radiant Melee Rax Top", objectives::label(38));
    assert_eq!("Radiant Range Rax Bot", objectives::label(43));
    assert_eq!("Dire Melee Rax Top", objectives::label(44));
    assert_eq!("Dire Range Rax Bot", objectives::label(49));
    assert_eq!("Radiant Ancient", objectives::label(50));
    assert_eq!("Dire Ancient", objectives::label(51));
}

#[test]
fn neutral_objectives() {
    assert_eq!("Roshan", objectives::label(133));
    assert_eq!("Roshan (Halloween)", objectives::label(134));
    assert_eq!("Roshan Minion (seasonal)", objectives::label(135));
    assert_eq!("Watch Tower", objectives::label(822));
    assert_eq!("Tormentor", objectives::label(861));
    assert_eq!("Twin Gate", objectives::label(864));
    assert_eq!("Lotus Pool", objectives::label(888));
    assert_eq!(
        "Tormentor Minion (ignore for kill attribution)",
        objectives::label(890)
    );
}

#[test]
fn unknown_ids() {
    assert_eq!(None, objectives::lookup(777));
    assert_eq!("npc#777", objectives::label(777));
    assert_eq!("npc#36", objectives::label(36));
    assert_eq!("npc#0", objectives::label(0));
    assert_eq!("npc#-5", objectives::label(-5));
}

#[test]
fn catalog_size() {
    // 3 roshan, 20 towers, 12 barracks, 2 ancients, 5 map objectives
    assert_eq!(42, objectives::OBJECTIVES.len());
}
