use std::time::{Duration, Instant};

use broadside_server::{ShipSteering, SteeringConfig, TakeDamage};
use broadside_shared::{
    Authority, Cannonball, ComponentKind, GameplayConfig, Health, ShipControls, WorkerType,
};
use broadside_test::{
    connect_worker, grant_ship_authority, init_logging, spawn_ship, tick_all,
    tick_until_settled, LocalDeployment,
};

fn health_of(deployment: &LocalDeployment, ship: &broadside_shared::EntityId) -> i32 {
    deployment
        .component::<Health>(ship)
        .map(|health| health.current_health)
        .unwrap_or_default()
}

#[test]
fn damage_follows_health_authority() {
    init_logging();
    let config = GameplayConfig::default();
    let deployment = LocalDeployment::new();
    let attacker = spawn_ship(&deployment, &config);
    let victim = spawn_ship(&deployment, &config);

    let mut first = connect_worker(&deployment, WorkerType::UnityWorker, "UnityWorker_a");
    let mut second = connect_worker(&deployment, WorkerType::UnityWorker, "UnityWorker_b");
    let first_id = first.world().worker_id().clone();
    let second_id = second.world().worker_id().clone();

    grant_ship_authority(&deployment, &victim, &first_id);
    for worker_id in [&first_id, &second_id] {
        deployment.check_out(worker_id, &victim);
    }
    first.add_behaviour(&victim, TakeDamage::new(config.clone()));
    second.add_behaviour(&victim, TakeDamage::new(config.clone()));
    tick_until_settled(&deployment, &mut [&mut first, &mut second], Instant::now());

    assert_eq!(first.connection().worker_id(), &first_id);
    assert_eq!(
        deployment.authority_holder(&victim, ComponentKind::Health),
        Some(first_id.clone())
    );
    assert!(first.behaviours().is_attached(&victim, "TakeDamage"));
    assert!(!second.behaviours().is_attached(&victim, "TakeDamage"));

    // both workers simulate the contact, only the authoritative one applies it
    let cannonball = Cannonball::new(attacker);
    first.trigger_enter(&victim, &cannonball);
    second.trigger_enter(&victim, &cannonball);
    tick_until_settled(&deployment, &mut [&mut first, &mut second], Instant::now());
    assert_eq!(health_of(&deployment, &victim), 750);
    assert_eq!(
        second.world().current_value::<Health>(&victim).cloned(),
        Some(Health::new(750))
    );

    let stale_writer = first.world().writer::<Health>(&victim);
    assert!(stale_writer.is_some());

    deployment.grant_authority(&victim, ComponentKind::Health, &second_id);
    tick_until_settled(&deployment, &mut [&mut first, &mut second], Instant::now());

    assert_eq!(
        deployment.authority_holder(&victim, ComponentKind::Health),
        Some(second_id.clone())
    );
    assert!(!first.behaviours().is_attached(&victim, "TakeDamage"));
    assert!(second.behaviours().is_attached(&victim, "TakeDamage"));
    assert!(first.world().writer::<Health>(&victim).is_none());

    if let Some(writer) = stale_writer {
        assert!(!writer.is_live());
        first
            .world_mut()
            .send_update(&writer, writer.update().set_current_health(1));
    }

    first.trigger_enter(&victim, &cannonball);
    second.trigger_enter(&victim, &cannonball);
    tick_until_settled(&deployment, &mut [&mut first, &mut second], Instant::now());

    assert_eq!(health_of(&deployment, &victim), 500);
    assert_eq!(
        first.world().current_value::<Health>(&victim).cloned(),
        Some(Health::new(500))
    );
}

#[test]
fn authority_loss_imminent_is_still_writable() {
    init_logging();
    let config = GameplayConfig::default();
    let deployment = LocalDeployment::new();
    let attacker = spawn_ship(&deployment, &config);
    let victim = spawn_ship(&deployment, &config);

    let mut server = connect_worker(&deployment, WorkerType::UnityWorker, "UnityWorker_a");
    let server_id = server.world().worker_id().clone();
    grant_ship_authority(&deployment, &victim, &server_id);
    deployment.check_out(&server_id, &victim);
    server.add_behaviour(&victim, TakeDamage::new(config.clone()));
    tick_until_settled(&deployment, &mut [&mut server], Instant::now());

    deployment.warn_authority_loss(&victim, ComponentKind::Health);
    tick_until_settled(&deployment, &mut [&mut server], Instant::now());

    assert_eq!(
        server.world().authority(&victim, &ComponentKind::Health),
        Authority::AuthorityLossImminent
    );
    assert!(server.behaviours().is_attached(&victim, "TakeDamage"));

    server.trigger_enter(&victim, &Cannonball::new(attacker));
    assert_eq!(health_of(&deployment, &victim), 750);
}

#[test]
fn only_the_authoritative_worker_steers() {
    init_logging();
    let config = GameplayConfig::default();
    let deployment = LocalDeployment::new();
    let ship = spawn_ship(&deployment, &config);

    let mut movement = connect_worker(
        &deployment,
        WorkerType::PirateShipMovement,
        "PirateShipMovement_a",
    );
    let mut bystander = connect_worker(
        &deployment,
        WorkerType::PirateShipMovement,
        "PirateShipMovement_b",
    );
    let movement_id = movement.world().worker_id().clone();
    let bystander_id = bystander.world().worker_id().clone();

    deployment.grant_authority(&ship, ComponentKind::ShipControls, &movement_id);
    for worker_id in [&movement_id, &bystander_id] {
        deployment.check_out(worker_id, &ship);
    }
    let steering = SteeringConfig::default();
    movement.add_behaviour(&ship, ShipSteering::with_seed(steering.clone(), 7));
    bystander.add_behaviour(&ship, ShipSteering::with_seed(steering.clone(), 11));

    let start = Instant::now();
    tick_until_settled(&deployment, &mut [&mut movement, &mut bystander], start);

    assert!(movement.behaviours().is_attached(&ship, "ShipSteering"));
    assert!(!bystander.behaviours().is_attached(&ship, "ShipSteering"));

    let steered = deployment.component::<ShipControls>(&ship);
    assert_eq!(steered, movement.world().current_value::<ShipControls>(&ship).cloned());
    assert_eq!(steered, bystander.world().current_value::<ShipControls>(&ship).cloned());
    let steered = steered.unwrap_or_default();
    assert!((0.0..steering.max_speed).contains(&steered.target_speed));
    assert!(steered.target_steering.abs() <= steering.max_steering);

    // nothing changes until the interval has passed
    tick_all(&mut [&mut movement, &mut bystander], start + Duration::from_secs(1));
    assert_eq!(deployment.component::<ShipControls>(&ship), Some(steered));

    deployment.grant_authority(&ship, ComponentKind::ShipControls, &bystander_id);
    tick_until_settled(
        &deployment,
        &mut [&mut movement, &mut bystander],
        start + Duration::from_secs(2),
    );

    assert!(!movement.behaviours().is_attached(&ship, "ShipSteering"));
    assert!(bystander.behaviours().is_attached(&ship, "ShipSteering"));
    assert_eq!(
        deployment.component::<ShipControls>(&ship),
        bystander.world().current_value::<ShipControls>(&ship).cloned()
    );
}

#[test]
fn remote_log_messages_are_consumed() {
    init_logging();
    let deployment = LocalDeployment::new();
    let mut worker = connect_worker(&deployment, WorkerType::UnityWorker, "UnityWorker_a");
    let worker_id = worker.world().worker_id().clone();

    deployment.log_message(&worker_id, log::Level::Info, "deployment is healthy");
    assert!(deployment.has_undelivered_ops());

    assert!(worker.tick(Instant::now()));
    assert!(!deployment.has_undelivered_ops());
}
