use jobsheet_core::models::form_data::FormData;
use serde_json::json;

fn material_list() -> FormData {
    serde_json::from_value(json!({
        "plumber": "Sipho",
        "geyser": { "size": "150L", "kwikot": true, "heatTech": false },
        "extraItem1": { "name": "Elbow", "quantity": 4 },
        "sundries": [
            { "name": "Tape", "qtyRequested": 2, "qtyUsed": 1 },
            "not a row",
            { "name": "Solder" }
        ]
    }))
    .unwrap()
}

#[test]
fn text_treats_empty_and_false_as_absent() {
    let data: FormData = [
        ("blank", json!("")),
        ("no", json!(false)),
        ("yes", json!(true)),
        ("nothing", json!(null)),
        ("name", json!("Jane")),
    ]
    .into_iter()
    .collect();

    assert_eq!(data.text("blank"), None);
    assert_eq!(data.text("no"), None);
    assert_eq!(data.text("nothing"), None);
    assert_eq!(data.text("missing"), None);
    assert_eq!(data.text("yes").as_deref(), Some("true"));
    assert_eq!(data.text("name").as_deref(), Some("Jane"));
}

#[test]
fn dotted_paths_walk_nested_objects() {
    let data = material_list();
    assert_eq!(data.text("geyser.size").as_deref(), Some("150L"));
    assert_eq!(data.text("extraItem1.quantity").as_deref(), Some("4"));
    assert!(data.flag("geyser.kwikot"));
    assert!(!data.flag("geyser.heatTech"));
    assert!(!data.flag("geyser.techron"));
    assert_eq!(data.text("dripTray.size"), None);
}

#[test]
fn exact_key_wins_over_path() {
    let data: FormData = [("a.b", json!("flat")), ("a", json!({ "b": "nested" }))]
        .into_iter()
        .collect();
    assert_eq!(data.text("a.b").as_deref(), Some("flat"));
}

#[test]
fn rows_keep_positions_of_malformed_entries() {
    let rows = material_list().rows("sundries");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].text("qtyRequested").as_deref(), Some("2"));
    assert!(rows[1].is_empty());
    assert_eq!(rows[2].text("qtyUsed"), None);
    assert!(material_list().rows("additionalMaterials").is_empty());
}

#[test]
fn indices_accept_arrays_and_json_strings() {
    let data: FormData = [
        ("array", json!([0, 4, "x", 7])),
        ("string", json!("[2, 3]")),
        ("garbage", json!("[2, 3")),
    ]
    .into_iter()
    .collect();

    assert_eq!(data.indices("array"), vec![0, 4, 7]);
    assert_eq!(data.indices("string"), vec![2, 3]);
    assert!(data.indices("garbage").is_empty());
    assert!(data.indices("missing").is_empty());
}

#[test]
fn query_maps_convert_to_form_data() {
    let mut query = std::collections::HashMap::new();
    query.insert("claimNumber".to_string(), "CLM-1".to_string());
    let data = FormData::from(query);
    assert_eq!(data.text("claimNumber").as_deref(), Some("CLM-1"));
}
