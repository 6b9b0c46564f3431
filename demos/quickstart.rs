use jdcal::{CalendarUnit, Moment, MomentConfig};

fn main() {
    let now = Moment::now(MomentConfig::default());
    let next_month = now.add(1, CalendarUnit::Month);
    let caesar = Moment::parse("BC44/3/15 12:00", MomentConfig::utc());

    println!("now:        {now} (JD {})", now.jdn());
    println!("next month: {}", next_month.format("dddd, MMMM D YYYY [at] h:mm A"));
    println!("ides:       {} (JD {})", caesar.format("YYYY-MM-DD ddd"), caesar.jdn());
    println!("ISO:        {}", now.to_iso_string());
}
