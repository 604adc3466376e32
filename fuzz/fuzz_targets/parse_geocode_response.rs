#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(collection) = serde_json::from_slice::<demarche_facile::FeatureCollection>(data) {
        for feature in &collection.features {
            let _ = feature.normalized();
        }
        let _ = demarche_facile::filter_mairies(&collection.features, "75056", "Paris");
    }
});
