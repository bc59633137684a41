//! Lock-On Demo
//!
//! Headless scripted scenario driving the lock-on controller and the
//! override distance volume against a tiny in-memory world: acquire a
//! target, switch right, cycle aim points, lose line of sight through the
//! grace window, prune a dead target, and blend the camera offset through
//! the volume. Run with `RUST_LOG=debug` for the controller's own logging.

use glam::{Vec2, Vec3};
use std::collections::HashMap;
use target_lock_engine::math::Rotator;
use target_lock_engine::targeting::{
    LockOnConfig, LockOnController, TargetDetails, TargetHandle, TargetPoint, TargetScene,
    ViewerController,
};
use target_lock_engine::volume::{OverrideDistanceVolume, OverrideVolumeConfig};

struct Enemy {
    name: &'static str,
    details: TargetDetails,
    position: Vec3,
    yaw: f32,
    visible: bool,
}

#[derive(Default)]
struct DemoWorld {
    order: Vec<TargetHandle>,
    enemies: HashMap<TargetHandle, Enemy>,
}

impl DemoWorld {
    fn spawn(
        &mut self,
        id: u32,
        name: &'static str,
        position: Vec3,
        details: TargetDetails,
    ) -> TargetHandle {
        let handle = TargetHandle(id);
        self.order.push(handle);
        self.enemies.insert(
            handle,
            Enemy {
                name,
                details,
                position,
                yaw: 0.0,
                visible: true,
            },
        );
        handle
    }

    fn name_of(&self, handle: TargetHandle) -> &'static str {
        self.enemies.get(&handle).map_or("<gone>", |e| e.name)
    }
}

impl TargetScene for DemoWorld {
    fn targets(&self) -> Vec<TargetHandle> {
        self.order.clone()
    }

    fn details(&self, target: TargetHandle) -> Option<&TargetDetails> {
        self.enemies.get(&target).map(|e| &e.details)
    }

    fn set_tracked(&mut self, target: TargetHandle, tracked: bool) {
        if let Some(enemy) = self.enemies.get_mut(&target) {
            enemy.details.tracked = tracked;
        }
    }

    fn position(&self, target: TargetHandle) -> Option<Vec3> {
        self.enemies.get(&target).map(|e| e.position)
    }

    fn point_position(&self, target: TargetHandle, point_index: usize) -> Option<Vec3> {
        // Aim points stacked vertically: head high, lower points beneath
        self.enemies.get(&target).map(|e| {
            let height = 1.8 - 0.7 * point_index as f32;
            e.position + Vec3::new(0.0, height, 0.0)
        })
    }

    fn yaw_of(&self, target: TargetHandle) -> Option<f32> {
        self.enemies.get(&target).map(|e| e.yaw)
    }

    fn line_of_sight(&self, _from: Vec3, to: Vec3) -> bool {
        self.enemies
            .values()
            .find(|e| (e.position - to).length() < 0.01)
            .is_none_or(|e| e.visible)
    }

    fn on_screen(&self, _point: Vec3) -> bool {
        true
    }
}

struct Player {
    position: Vec3,
    yaw: f32,
    look: Rotator,
    camera_offset: Vec3,
}

impl ViewerController for Player {
    fn position(&self) -> Vec3 {
        self.position
    }
    fn yaw(&self) -> f32 {
        self.yaw
    }
    fn camera_pose(&self) -> Option<(Vec3, Rotator)> {
        Some((self.position + Vec3::new(0.0, 1.8, 0.0), self.look))
    }
    fn look_rotation(&self) -> Rotator {
        self.look
    }
    fn set_look_rotation(&mut self, rotation: Rotator) {
        self.look = rotation;
    }
    fn seize_look_control(&mut self) {
        log::info!("player: look input seized");
    }
    fn release_look_control(&mut self) {
        log::info!("player: look input released");
    }
    fn set_look_driven_rotation(&mut self, enabled: bool) {
        log::debug!("player: look-driven rotation = {enabled}");
    }
    fn camera_offset(&self) -> Vec3 {
        self.camera_offset
    }
    fn set_camera_offset(&mut self, offset: Vec3) {
        self.camera_offset = offset;
    }
}

fn run_ticks(
    controller: &mut LockOnController,
    world: &mut DemoWorld,
    player: &mut Player,
    seconds: f32,
) {
    let mut elapsed = 0.0;
    while elapsed < seconds {
        controller.tick(0.1, world, player);
        elapsed += 0.1;
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut world = DemoWorld::default();
    let grunt = world.spawn(1, "grunt", Vec3::new(0.0, 0.0, -600.0), TargetDetails::default());
    let brute = world.spawn(
        2,
        "brute",
        Vec3::new(300.0, 0.0, -800.0),
        TargetDetails::new(
            true,
            "head",
            vec![
                TargetPoint::new("head", 0),
                TargetPoint::new("chest", 1),
                TargetPoint::new("legs", 2),
            ],
        ),
    );
    let archer = world.spawn(3, "archer", Vec3::new(-500.0, 0.0, -1400.0), TargetDetails::default());

    let mut player = Player {
        position: Vec3::ZERO,
        yaw: 0.0,
        look: Rotator::ZERO,
        camera_offset: Vec3::new(0.0, 2.0, 3.0),
    };

    let mut config = LockOnConfig::default();
    config.auto_target_switch = true;
    let mut controller = LockOnController::new(config);

    controller
        .on_target_locked_on
        .subscribe(|target| log::info!("event: locked on {target:?}"));
    controller
        .on_target_locked_off
        .subscribe(|target| log::info!("event: locked off {target:?}"));
    controller
        .on_target_died
        .subscribe(|target| log::info!("event: target died {target:?}"));
    controller
        .on_finish_target_lock
        .subscribe(|_| log::info!("event: lock finished"));

    // --- Acquire ---------------------------------------------------------
    log::info!("pressing lock-on...");
    controller.try_start_target_lock(&mut world, &mut player);
    log::info!(
        "locked: {} (aim point '{}')",
        world.name_of(controller.locked_target().unwrap()),
        controller.current_point_name()
    );
    run_ticks(&mut controller, &mut world, &mut player, 1.0);
    log::info!(
        "camera settled at yaw {:.1} pitch {:.1}",
        player.look.yaw,
        player.look.pitch
    );

    // --- Switch right to the brute ---------------------------------------
    log::info!("flicking the stick right...");
    controller.switch_target(&mut world, &mut player, Vec2::new(1.0, 0.0));
    log::info!("now locked: {}", world.name_of(controller.locked_target().unwrap()));
    run_ticks(&mut controller, &mut world, &mut player, 0.6);

    // --- Cycle the brute's aim points ------------------------------------
    log::info!("flicking again to cycle aim points...");
    controller.switch_target(&mut world, &mut player, Vec2::new(1.0, 0.0));
    log::info!("aim point is now '{}'", controller.current_point_name());
    run_ticks(&mut controller, &mut world, &mut player, 0.6);

    // --- Lose line of sight, survive the grace window ---------------------
    log::info!("{} steps behind a wall...", world.name_of(brute));
    world.enemies.get_mut(&brute).unwrap().visible = false;
    run_ticks(&mut controller, &mut world, &mut player, 1.5);
    log::info!("still locked: {}", controller.is_locked());
    world.enemies.get_mut(&brute).unwrap().visible = true;
    log::info!("...and steps back out before the grace period ends");
    run_ticks(&mut controller, &mut world, &mut player, 1.0);
    log::info!("still locked: {}", controller.is_locked());

    // --- Death pruning with auto-switch ----------------------------------
    log::info!("{} goes down!", world.name_of(brute));
    world.enemies.get_mut(&brute).unwrap().details.tracked = false;
    run_ticks(&mut controller, &mut world, &mut player, 0.6);
    log::info!(
        "auto-switched to: {}",
        controller
            .locked_target()
            .map_or("<none>", |t| world.name_of(t))
    );

    // --- Override volume --------------------------------------------------
    log::info!("entering the arena volume...");
    let volume_config = OverrideVolumeConfig {
        target_camera_offset: Vec3::new(0.0, 6.0, 10.0),
        ..OverrideVolumeConfig::default()
    };
    let mut volume = OverrideDistanceVolume::new(volume_config, &[grunt, archer], &world);
    volume
        .on_trigger_activated
        .subscribe(|active| log::info!("event: volume trigger = {active}"));

    volume.on_overlap_begin(&player);
    for _ in 0..12 {
        volume.tick(0.1, &mut player);
    }
    log::info!("camera offset widened to {:?}", player.camera_offset);

    volume.notify_target_died(grunt);
    volume.notify_target_died(archer);
    for _ in 0..12 {
        volume.tick(0.1, &mut player);
    }
    log::info!("camera offset restored to {:?}", player.camera_offset);

    // --- Disengage --------------------------------------------------------
    log::info!("releasing the lock");
    controller.stop_observing_target(&mut world, &mut player, true, false);
    log::info!("locked: {}", controller.is_locked());
}
