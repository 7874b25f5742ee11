use proptest::prelude::*;

mod proptest_helpers;

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn iou_is_symmetric(
        a in proptest_helpers::arb_any_bbox(),
        b in proptest_helpers::arb_any_bbox(),
    ) {
        prop_assert_eq!(a.iou(&b), b.iou(&a));
    }

    #[test]
    fn iou_with_itself_is_one(a in proptest_helpers::arb_bbox()) {
        prop_assert_eq!(a.iou(&a), 1.0);
    }

    #[test]
    fn iou_stays_in_unit_interval(
        a in proptest_helpers::arb_any_bbox(),
        b in proptest_helpers::arb_any_bbox(),
    ) {
        let iou = a.iou(&b);
        prop_assert!(iou.is_finite());
        prop_assert!((0.0..=1.0 + 1e-12).contains(&iou), "iou {} out of range", iou);
    }

    #[test]
    fn intersection_never_exceeds_either_area(
        a in proptest_helpers::arb_any_bbox(),
        b in proptest_helpers::arb_any_bbox(),
    ) {
        let inter = a.intersection_area(&b);
        prop_assert!(inter >= 0.0);
        prop_assert!(inter <= a.area() + 1e-9);
        prop_assert!(inter <= b.area() + 1e-9);
    }

    #[test]
    fn zone_edges_are_inclusive(
        zone in proptest_helpers::arb_zone(),
        (width, height) in proptest_helpers::arb_image_size(),
    ) {
        use zonecount::ir::{BBoxXYXY, Pixel};

        let resolved = zone.resolve(width, height);
        let rect = *resolved.rect();
        let cy = (rect.y1() + rect.y2()) / 2.0;

        let on_edge = BBoxXYXY::<Pixel>::from_xyxy(rect.x2() - 5.0, cy - 5.0, rect.x2() + 5.0, cy + 5.0);
        let beyond = BBoxXYXY::<Pixel>::from_xyxy(rect.x2() - 4.0, cy - 5.0, rect.x2() + 6.0, cy + 5.0);
        prop_assert!(resolved.contains(&on_edge));
        prop_assert!(!resolved.contains(&beyond));

        let cx = (rect.x1() + rect.x2()) / 2.0;
        let top_edge = BBoxXYXY::<Pixel>::from_xyxy(cx - 5.0, rect.y1() - 5.0, cx + 5.0, rect.y1() + 5.0);
        let above = BBoxXYXY::<Pixel>::from_xyxy(cx - 5.0, rect.y1() - 6.0, cx + 5.0, rect.y1() + 4.0);
        prop_assert!(resolved.contains(&top_edge));
        prop_assert!(!resolved.contains(&above));
    }

    #[test]
    fn zone_resolution_stays_inside_image(
        zone in proptest_helpers::arb_zone(),
        (width, height) in proptest_helpers::arb_image_size(),
    ) {
        let rect = *zone.resolve(width, height).rect();
        prop_assert!(rect.x1() >= 0.0 && rect.x2() <= f64::from(width));
        prop_assert!(rect.y1() >= 0.0 && rect.y2() <= f64::from(height));
        prop_assert!(rect.is_ordered());
    }
}
