use collector::sink::{self, DocumentSink, FileSink};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn sanitize_plain_names() {
    assert_eq!("Team_Spirit", sink::sanitize("Team Spirit"));
    assert_eq!("Natus_Vincere", sink::sanitize("Natus  Vincere"));
    assert_eq!("BetBoom.Team-2", sink::sanitize("BetBoom.Team-2"));
    assert_eq!("a_b", sink::sanitize("__a!!_?b__"));
    assert_eq!("Xtreme_Gaming", sink::sanitize("  Xtreme Gaming!  "));
}

#[test]
fn sanitize_strips_accents() {
    assert_eq!("Nemesis", sink::sanitize("Némésis"));
    assert_eq!("Ano_Lu", sink::sanitize("Año Lü"));
}

#[test]
fn sanitize_falls_back_to_team() {
    assert_eq!("team", sink::sanitize(""));
    assert_eq!("team", sink::sanitize("___"));
    assert_eq!("team", sink::sanitize("Тундра"));
    assert_eq!("team", sink::sanitize("战队"));
}

#[test]
fn team_file_names() {
    let doc = json!({ "data": { "team": { "id": 36, "name": "Natus Vincere", "tag": "NAVI" } } });
    assert_eq!("36_Natus_Vincere.json", sink::team_file_name(&doc, 1));

    let doc = json!({ "data": { "team": { "id": 36, "name": "  ", "tag": "NAVI" } } });
    assert_eq!("36_NAVI.json", sink::team_file_name(&doc, 1));

    let doc = json!({ "data": { "team": { "id": 36, "name": null, "tag": "" } } });
    assert_eq!("36_team.json", sink::team_file_name(&doc, 1));

    // only numeric ids are taken from the document
    let doc = json!({ "data": { "team": { "id": "36", "name": "Navi" } } });
    assert_eq!("7_Navi.json", sink::team_file_name(&doc, 7));

    let doc = json!({ "data": null, "errors": [{ "message": "Not found" }] });
    assert_eq!("9_team.json", sink::team_file_name(&doc, 9));
}

#[test]
fn analyzed_file_names() {
    assert_eq!(
        "36_Navi-analyzed.json",
        sink::analyzed_file_name(std::path::Path::new("out/raw/36_Navi.json"))
    );
    assert_eq!(
        "notes-analyzed.json",
        sink::analyzed_file_name(std::path::Path::new("notes"))
    );
}

#[tokio::test]
async fn file_sink_creates_folder() {
    let dir = tempfile::tempdir().unwrap();
    let folder = dir.path().join("nested").join("raw");
    let sink = FileSink::new(&folder);

    let doc = json!({ "data": { "team": { "id": 36 } } });
    let path = sink.write("36_Navi.json".to_owned(), &doc).await.unwrap();

    assert_eq!(folder.join("36_Navi.json"), path);
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains('\n'), "Expected pretty printed JSON: {}", content);
    assert_eq!(doc, serde_json::from_str::<serde_json::Value>(&content).unwrap());
}
