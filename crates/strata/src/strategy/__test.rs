use super::*;

fn rng() -> fastrand::Rng {
    fastrand::Rng::with_seed(7)
}

fn owned(points: &[&[f64]]) -> Vec<Vec<f64>> {
    points.iter().map(|p| p.to_vec()).collect()
}

/* -------------------------------------- Dimension Choice -------------------------------------- */

#[test]
fn alternate_cycles_and_wraps() {
    let points = owned(&[&[0., 0., 0.]]);
    let members = [0];

    let pick = DimensionChoice::Alternate.select(&points, &members, 3, 0, &mut rng());
    assert!(pick.axis == 1);

    let pick = DimensionChoice::Alternate.select(&points, &members, 3, 2, &mut rng());
    assert!(pick.axis == 0);

    assert!(pick.mean.is_none() && pick.min.is_none() && pick.max.is_none());
}

#[test]
fn random_axis_stays_in_range() {
    let points = owned(&[&[0., 0., 0., 0.]]);
    let members = [0];
    let mut rng = rng();

    for _ in 0..32 {
        let pick = DimensionChoice::Random.select(&points, &members, 4, 0, &mut rng);
        assert!(pick.axis < 4);
    }
}

#[test]
fn max_variance_picks_spread_axis_and_reports_its_mean() {
    // Axis 0 varies, axis 1 is constant.
    let points = owned(&[&[0., 10.], &[2., 10.], &[4., 10.]]);
    let members = [0, 1, 2];

    let pick = DimensionChoice::MaxVariance.select(&points, &members, 2, 0, &mut rng());

    assert!(pick.axis == 0);
    assert!(pick.mean == Some(2.));
    assert!(pick.min.is_none() && pick.max.is_none());
}

#[test]
fn max_variance_tie_keeps_the_earlier_axis() {
    let points = owned(&[&[0., 0.], &[1., 1.]]);
    let members = [0, 1];

    let pick = DimensionChoice::MaxVariance.select(&points, &members, 2, 0, &mut rng());
    assert!(pick.axis == 0);
}

#[test]
fn max_variance_all_flat_defaults_to_axis_zero_with_true_mean() {
    let points = owned(&[&[7., 3.], &[7., 3.]]);
    let members = [0, 1];

    let pick = DimensionChoice::MaxVariance.select(&points, &members, 2, 0, &mut rng());

    assert!(pick.axis == 0);
    assert!(pick.mean == Some(7.));
}

#[test]
fn widest_interval_reports_the_winning_axis_bounds() {
    // Axis 1 is scanned last but axis 0 wins; the extras must belong to the
    // winner, not to whichever axis was measured most recently.
    let points = owned(&[&[0., 5.], &[10., 6.]]);
    let members = [0, 1];

    let pick = DimensionChoice::WidestInterval.select(&points, &members, 2, 0, &mut rng());

    assert!(pick.axis == 0);
    assert!(pick.min == Some(0.));
    assert!(pick.max == Some(10.));
    assert!(pick.mean.is_none());
}

/* ---------------------------------------- Split Choice ---------------------------------------- */

#[test]
fn mean_split_prefers_the_precomputed_extra() {
    let points = owned(&[&[1.], &[2.], &[3.]]);
    let members = [0, 1, 2];

    let pick = DimensionPick {
        mean: Some(42.),
        ..DimensionPick::new(0)
    };
    let value = SplitChoice::Mean.select(&points, &members, 0, &pick, &mut rng());
    assert!(value == 42.);

    let value = SplitChoice::Mean.select(&points, &members, 0, &DimensionPick::new(0), &mut rng());
    assert!(value == 2.);
}

#[test]
fn median_split_is_the_lower_median_of_a_sorted_view() {
    let points = owned(&[&[3.], &[1.], &[2.]]);
    let members = [0, 1, 2];

    let value = SplitChoice::Median.select(&points, &members, 0, &DimensionPick::new(0), &mut rng());
    assert!(value == 2.);

    // Even count takes the upper of the two middle values.
    let points = owned(&[&[4.], &[1.], &[3.], &[2.]]);
    let members = [0, 1, 2, 3];

    let value = SplitChoice::Median.select(&points, &members, 0, &DimensionPick::new(0), &mut rng());
    assert!(value == 3.);
}

#[test]
fn random_split_lands_inside_the_axis_interval() {
    let points = owned(&[&[2.], &[10.], &[4.]]);
    let members = [0, 1, 2];
    let mut rng = rng();

    for _ in 0..32 {
        let value =
            SplitChoice::Random.select(&points, &members, 0, &DimensionPick::new(0), &mut rng);
        assert!((2. ..10.).contains(&value));
    }

    // Degenerate interval collapses to the single coordinate.
    let points = owned(&[&[5.], &[5.]]);
    let members = [0, 1];
    let value = SplitChoice::Random.select(&points, &members, 0, &DimensionPick::new(0), &mut rng);
    assert!(value == 5.);
}

#[test]
fn geometric_center_uses_extras_when_both_are_present() {
    let points = owned(&[&[0.], &[4.]]);
    let members = [0, 1];

    let pick = DimensionPick {
        min: Some(10.),
        max: Some(20.),
        ..DimensionPick::new(0)
    };
    let value = SplitChoice::GeometricCenter.select(&points, &members, 0, &pick, &mut rng());
    assert!(value == 15.);

    // A lone extra is not enough; the interval is rescanned.
    let pick = DimensionPick {
        min: Some(10.),
        ..DimensionPick::new(0)
    };
    let value = SplitChoice::GeometricCenter.select(&points, &members, 0, &pick, &mut rng());
    assert!(value == 2.);
}

/* ----------------------------------------- Seed Choice ---------------------------------------- */

#[test]
fn one_dim_farthest_seeds_are_the_axis_extremes() {
    let points = owned(&[&[0.], &[5.], &[10.]]);
    let members = [0, 1, 2];

    let pick = SeedChoice::OneDimFarthest.select(
        &points,
        &members,
        1,
        &DimensionChoice::WidestInterval,
        0,
        &mut rng(),
    );

    // Max point first, min point second.
    assert!(pick.seeds == [2, 0]);
    assert!(pick.axis == Some(0));
}

#[test]
fn one_dim_farthest_ties_keep_the_first_occurrence() {
    let points = owned(&[&[5.], &[5.], &[0.], &[0.]]);
    let members = [0, 1, 2, 3];

    let pick = SeedChoice::OneDimFarthest.select(
        &points,
        &members,
        1,
        &DimensionChoice::WidestInterval,
        0,
        &mut rng(),
    );

    assert!(pick.seeds == [0, 2]);
}

#[test]
fn farthest_euc_distance_scans_all_pairs() {
    let points = owned(&[&[0., 0.], &[1., 0.], &[10., 0.]]);
    let members = [0, 1, 2];

    let pick = SeedChoice::FarthestEucDistance.select(
        &points,
        &members,
        2,
        &DimensionChoice::Random,
        0,
        &mut rng(),
    );

    assert!(pick.seeds == [0, 2]);
    assert!(pick.axis.is_none());
}

#[test]
fn farthest_euc_distance_degenerate_sets() {
    // Singleton pairs the point with itself.
    let points = owned(&[&[1., 1.]]);
    let pick = SeedChoice::FarthestEucDistance.select(
        &points,
        &[0],
        2,
        &DimensionChoice::Random,
        0,
        &mut rng(),
    );
    assert!(pick.seeds == [0, 0]);

    // All-identical members keep the first pair seen.
    let points = owned(&[&[1., 1.], &[1., 1.], &[1., 1.]]);
    let pick = SeedChoice::FarthestEucDistance.select(
        &points,
        &[0, 1, 2],
        2,
        &DimensionChoice::Random,
        0,
        &mut rng(),
    );
    assert!(pick.seeds == [0, 1]);
}

/* --------------------------------------- Grouping Choice -------------------------------------- */

#[test]
fn closest_seed_sends_ties_to_group_two() {
    // Arena: two seeds plus three members, one of them equidistant.
    let points = owned(&[&[0., 0.], &[10., 10.], &[1., 1.], &[9., 9.], &[5., 5.]]);

    let (group1, group2) = GroupingChoice::ClosestSeed.select(&points, &[2, 3, 4], 0, 1);

    assert!(group1 == [2]);
    assert!(group2 == [3, 4]);
}

#[test]
fn sorting_distance_cuts_the_sorted_order_in_half() {
    let points = owned(&[&[0.], &[3.], &[1.], &[10.], &[2.]]);

    let (group1, group2) =
        GroupingChoice::SortingDistanceToOneSeed.select(&points, &[0, 1, 2, 3, 4], 0, 3);

    // floor(5 / 2) closest to the seed on the left.
    assert!(group1 == [0, 2]);
    assert!(group2 == [4, 1, 3]);
}

#[test]
fn sorting_distance_is_balanced_for_even_counts() {
    let points = owned(&[&[0.], &[1.], &[2.], &[3.]]);

    let (group1, group2) =
        GroupingChoice::SortingDistanceToOneSeed.select(&points, &[0, 1, 2, 3], 0, 3);

    assert!(group1.len() == 2);
    assert!(group2.len() == 2);
}

/* ---------------------------------------- Name Boundary --------------------------------------- */

#[test]
fn strategy_names_parse_to_their_variants() {
    assert!("alternate".parse::<DimensionChoice>().unwrap() == DimensionChoice::Alternate);
    assert!("max_variance".parse::<DimensionChoice>().unwrap() == DimensionChoice::MaxVariance);
    assert!("widest_interval".parse::<DimensionChoice>().unwrap() == DimensionChoice::WidestInterval);
    assert!("geometric_center".parse::<SplitChoice>().unwrap() == SplitChoice::GeometricCenter);
    assert!("median".parse::<SplitChoice>().unwrap() == SplitChoice::Median);
    assert!("one_dim_farthest".parse::<SeedChoice>().unwrap() == SeedChoice::OneDimFarthest);
    assert!(
        "farthest_euc_distance".parse::<SeedChoice>().unwrap() == SeedChoice::FarthestEucDistance
    );
    assert!("closest_seed".parse::<GroupingChoice>().unwrap() == GroupingChoice::ClosestSeed);
    assert!(
        "sorting_distance_to_one_seed".parse::<GroupingChoice>().unwrap()
            == GroupingChoice::SortingDistanceToOneSeed
    );
}

#[test]
fn unknown_names_fail_fast_at_the_boundary() {
    let err = "kd".parse::<DimensionChoice>().unwrap_err();
    assert!(matches!(
        err,
        BuildError::UnknownStrategy { kind: "dimension", .. }
    ));

    assert!("".parse::<SplitChoice>().is_err());
    assert!("closest".parse::<SeedChoice>().is_err());
    assert!("kmeans".parse::<GroupingChoice>().is_err());
}
