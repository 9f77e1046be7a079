use utopian::{describe_interval, EarthTime, MarsDateTime, MarsTime, Scale, TimeZone, TT};

fn main() {
    let earth = EarthTime::now();
    let mars = MarsTime::from_earth_time(&earth);
    let local = mars.to_date_time(TimeZone::new(-2).expect("valid slot"));

    println!("Earth: {earth}");
    println!("JD(UTC): {}", earth.to_julian_date(Scale::Utc));
    println!("JD(TT): {}", mars.to_time::<TT>());
    println!("MSD: {:.5}", mars.mars_sol_date());
    println!("Mars ({}): {local}", local.time_zone_string());
    println!(
        "{}, {} {} of mir {}",
        local.sol_name(),
        local.sol(),
        local.month_name(),
        local.mir()
    );

    let epoch = MarsDateTime::default();
    println!(
        "Epoch {epoch} was {} ago",
        describe_interval(earth.timestamp() - epoch.timestamp())
    );
}
