// Rubber ball dropped onto a stick floor, stepped headless by `MpmPlugin`.
//
//     cargo run --example sphere_drop --features bevy -- /tmp/sphere_drop
use std::path::PathBuf;
use std::sync::Arc;

use bevy::log::LogPlugin;
use bevy::prelude::*;
use mpm3d::config::DEFAULT_INTERPOLATION_ORDER;
use mpm3d::core::Face;
use mpm3d::materials::SolidParams;
use mpm3d::math::Vector;
use mpm3d::{
    BoundaryConditions, BoundaryHandling, MaterialLibrary, MpmPlugin, MpmState, NeoHookean,
    ParticleFill, SolverParams, Sphere, UniformGrid,
};

const TIME_STEP: f64 = 1.0e-4;
const TOTAL_STEPS: usize = 2000;
const WRITE_EVERY: usize = 100;

#[derive(Resource)]
struct Output {
    base: PathBuf,
    written: usize,
}

fn build_state() -> mpm3d::Result<MpmState> {
    let grid = Arc::new(UniformGrid::try_new([20, 20, 20], 0.05)?);
    let params = SolverParams::with_gravity().with_time_step(TIME_STEP);

    let mut boundaries = BoundaryConditions::uniform(BoundaryHandling::Slip);
    boundaries.set(Face::NegZ, Arc::new(BoundaryHandling::Stick));

    let rubber = NeoHookean::new(SolidParams::rubber())?;
    let mut state = MpmState::new(grid, params)?
        .with_boundary_conditions(boundaries)
        .with_material_models(MaterialLibrary::new().with(rubber)?);

    let fill = ParticleFill::new(mpm3d::config::RUBBER_DENSITY, 0)
        .with_velocity(Vector::new(0.5, 0.0, -1.0));
    let ball = Sphere::new(Vector::new(0.4, 0.5, 0.6), 0.15, fill);
    state.initialize(&[&ball], DEFAULT_INTERPOLATION_ORDER)?;
    Ok(state)
}

fn write_snapshots(state: Option<Res<MpmState>>, mut output: ResMut<Output>) {
    let Some(state) = state else {
        error!("simulation stopped early");
        std::process::exit(1);
    };

    let step = state.step_index();
    if step < (output.written + 1) * WRITE_EVERY {
        return;
    }

    output.written += 1;
    match state.write_time_step_to_file(&output.base, output.written) {
        Ok(path) => info!(
            "Time Step {step}/{TOTAL_STEPS}: {:.4} (s) -> {}",
            state.time(),
            path.display()
        ),
        Err(err) => {
            error!("{err}");
            std::process::exit(1);
        }
    }
    info!("{}", state.conservation_report());

    if step >= TOTAL_STEPS {
        std::process::exit(0);
    }
}

fn main() {
    let base = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("sphere_drop"));

    let state = match build_state() {
        Ok(state) => state,
        Err(err) => {
            eprintln!("failed to set up the scene: {err}");
            std::process::exit(1);
        }
    };
    if let Err(err) = state.write_time_step_to_file(&base, 0) {
        eprintln!("{err}");
        std::process::exit(1);
    }

    App::new()
        .add_plugins((MinimalPlugins, LogPlugin::default()))
        .insert_resource(Time::<Fixed>::from_seconds(TIME_STEP))
        .insert_resource(state)
        .insert_resource(Output { base, written: 0 })
        .add_plugins(MpmPlugin)
        .add_systems(Update, write_snapshots)
        .run();
}
