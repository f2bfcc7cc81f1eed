use chromorph::{
    convert, weights_for, ColorSpace, GamutLibrary, Lattice, Palette, Pigment, Settings, Srgb,
    TransitionState,
};
use std::time::Duration;

fn studio_palette() -> Palette {
    Palette::new(vec![
        Pigment::new(1.0, 1.0, 1.0),
        Pigment::new(0.08, 0.08, 0.08),
        Pigment::new(1.0, 0.92, 0.0),
        Pigment::new(0.89, 0.0, 0.13),
        Pigment::new(0.1, 0.1, 0.7),
        Pigment::new(0.0, 0.47, 0.44),
    ])
}

#[test]
fn orange_projects_close_to_a_mixable_color() {
    let mut library = GamutLibrary::new(studio_palette());
    library.rebuild(studio_palette(), 20).unwrap();

    let gamut = library.snapshot().unwrap();
    assert_eq!(gamut.table().len(), 3711);

    let orange = Srgb::new(1.0, 0.5, 0.0);
    let projection = library.project(&orange).unwrap();
    assert!(projection.distance.is_finite());
    // Red has no green at all, so even 5% of it darkens green heavily under
    // per-channel mixing and the nearest mixture sits around 35 away.
    assert!(projection.distance < 40.0, "distance {}", projection.distance);

    // Orange needs yellow, red or both.
    let recipe = projection.recipe.unwrap();
    assert!(recipe
        .parts()
        .iter()
        .any(|part| part.pigment == 2 || part.pigment == 3));

    // Finer ratios reach closer.
    library.set_steps(40);
    library.refresh().unwrap();
    let finer = library.project(&orange).unwrap();
    assert!(finer.distance < projection.distance);
}

#[test]
fn settings_drive_a_full_frame() {
    let settings = Settings::from_json_str(
        r#"{ "palette": "studio", "step_count": 6, "transition_seconds": 1.0 }"#,
    )
    .unwrap();

    let mut library = settings.gamut_library();
    library.refresh().unwrap();
    let projections = library
        .project_all(&[Srgb::new(0.2, 0.3, 0.8), Srgb::new(0.9, 0.9, 0.1)])
        .unwrap();
    assert_eq!(projections.len(), 2);

    let lattice = settings.lattice().unwrap();
    let mut transition = settings.transition();
    transition.start_transition(ColorSpace::Oklab);
    transition.tick(Duration::from_secs(2));

    // Once a transition settles, a lattice corner sits on its converted
    // position.
    let corner = Srgb::new(1.0, 1.0, 0.0);
    let influence = weights_for(&corner, lattice.size()).unwrap();
    let placed = lattice.deform(&influence, &transition);
    let expected = convert(&corner, ColorSpace::Oklab);
    approx::assert_abs_diff_eq!(placed.x, expected.x, epsilon = 1.0e-9);
    approx::assert_abs_diff_eq!(placed.y, expected.y, epsilon = 1.0e-9);
    approx::assert_abs_diff_eq!(placed.z, expected.z, epsilon = 1.0e-9);

    assert_eq!(lattice.pose(ColorSpace::Oklab).len(), Lattice::DEFAULT_SIZE.pow(3));
    assert_eq!(
        TransitionState::default().duration(),
        Duration::from_millis(1500)
    );
}
