use super::*;

#[test]
fn ids_round_trip_through_from_str() {
    for v in BusinessVertical::ALL {
        assert_eq!(v.id().parse::<BusinessVertical>().unwrap(), v);
        assert_eq!(v.to_string(), v.id());
    }
    assert!("spaceship".parse::<BusinessVertical>().is_err());
}

#[test]
fn category_keywords_pick_the_specific_vertical() {
    assert_eq!(BusinessVertical::from_category("Food Mall"), BusinessVertical::FoodMall);
    assert_eq!(BusinessVertical::from_category("Italian Restaurant"), BusinessVertical::Restaurant);
    assert_eq!(BusinessVertical::from_category("Coffee Shop"), BusinessVertical::Retail);
    assert_eq!(BusinessVertical::from_category("Creative Studio"), BusinessVertical::Agency);
    assert_eq!(BusinessVertical::from_category("Graphic Design"), BusinessVertical::Creative);
    assert_eq!(BusinessVertical::from_category("Day Spa"), BusinessVertical::Wellness);
    assert_eq!(BusinessVertical::from_category("Tax Consultant"), BusinessVertical::Professional);
    assert_eq!(BusinessVertical::from_category("food-mall"), BusinessVertical::FoodMall);
}

#[test]
fn unknown_category_defaults_to_restaurant() {
    assert_eq!(BusinessVertical::from_category(""), BusinessVertical::Restaurant);
    assert_eq!(BusinessVertical::from_category("???"), BusinessVertical::Restaurant);
}

#[test]
fn every_vertical_has_a_distinct_route_and_known_template() {
    let mut routes: Vec<_> = BusinessVertical::ALL
        .iter()
        .map(|v| v.profile().route_prefix)
        .collect();
    routes.sort_unstable();
    routes.dedup();
    assert_eq!(routes.len(), BusinessVertical::ALL.len());

    for v in BusinessVertical::ALL {
        let id = v.profile().default_template_id;
        assert!(crate::template::catalog::find(id).is_some(), "{v}: {id}");
    }
}

#[test]
fn serde_uses_kebab_case() {
    assert_eq!(
        serde_json::to_value(BusinessVertical::FoodMall).unwrap(),
        serde_json::json!("food-mall")
    );
}
