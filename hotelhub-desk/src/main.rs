//! HotelHub Desk - front-desk command line over the HotelHub data services
//!
//! Without `HOTELHUB_API_URL` the desk runs on a seeded in-memory hotel.

mod config;
mod demo;
mod logger;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use config::DeskConfig;
use hotelhub_client::notify::drain;
use hotelhub_client::{EntityService, HotelServices, Latency, MemoryRecordStore, Role};
use shared::models::{BookingDraft, stay_nights};
use tracing::info;

/// HotelHub Desk - bookings, rooms, staff and guests from the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Skip the simulated network latency
    #[arg(long, global = true)]
    no_latency: bool,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Revenue and occupancy summary
    #[command(visible_alias = "r")]
    Report,

    /// Rooms, ordered by number
    Rooms {
        /// Only rooms with this status (e.g. Available)
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Bookings, newest first
    Bookings,

    /// Housekeeping and maintenance tasks, newest first
    Tasks,

    /// Staff directory
    Staff {
        /// Only staff holding this role (e.g. MANAGER)
        #[arg(short, long)]
        role: Option<String>,
    },

    /// Price a stay in one room
    #[command(visible_alias = "q")]
    Quote {
        /// Room id
        room: i64,
        /// Check-in date (YYYY-MM-DD)
        check_in: String,
        /// Check-out date (YYYY-MM-DD)
        check_out: String,
    },

    /// Guest list
    Guests {
        /// Filter by name, email or phone
        #[arg(short, long)]
        search: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let args = Args::parse();
    let config = DeskConfig::from_env();
    logger::init_logger(&config.log_level, config.log_dir.as_deref());

    let latency = if args.no_latency {
        Latency::none()
    } else {
        config.client.latency()
    };

    let services = if config.is_demo() {
        info!("No HOTELHUB_API_URL set, using demo data");
        let store = Arc::new(MemoryRecordStore::new());
        demo::seed(&store);
        HotelServices::with_store(store, latency)
    } else {
        let services = HotelServices::from_config(&config.client)?;
        let context = services.context().clone().with_latency(latency);
        HotelServices::new(context)
    };

    let mut notices = services.notifications().subscribe();
    run(&services, args.command).await?;

    for notice in drain(&mut notices) {
        eprintln!("! [{}] {}", notice.source, notice.message);
    }

    Ok(())
}

async fn run(services: &HotelServices, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Report => {
            let summary = services.reports().load().await;
            println!("Total revenue     {}", summary.total_revenue);
            println!("Occupancy rate    {}%", summary.occupancy_rate);
            println!("Average rate      {}", summary.average_room_rate);
            println!("Total bookings    {}", summary.total_bookings);
            let status = summary.room_status;
            println!(
                "Rooms             {} occupied, {} available, {} maintenance, {} other",
                status.occupied, status.available, status.maintenance, status.other
            );
        }
        Command::Rooms { status } => {
            let rooms = services.rooms.get_all().await;
            for room in rooms
                .iter()
                .filter(|r| status.as_deref().is_none_or(|s| r.has_status(s)))
            {
                println!(
                    "{:>4}  {:<5} {:<10} {:<12} {:>8}  {}",
                    room.id,
                    room.number.as_deref().unwrap_or("-"),
                    room.room_type.as_deref().unwrap_or("-"),
                    room.status.as_deref().unwrap_or("-"),
                    room.price_per_night.map(|p| p.to_string()).unwrap_or_default(),
                    room.amenities.as_deref().unwrap_or_default().join(", ")
                );
            }
        }
        Command::Bookings => {
            for booking in services.bookings.get_all().await {
                println!(
                    "{:>4}  {:<18} room {:<5} {} -> {}  {:<11} {:>8}",
                    booking.id,
                    booking.guest_name.as_deref().unwrap_or("-"),
                    booking.room_number.as_deref().unwrap_or("-"),
                    booking.check_in.as_deref().unwrap_or("?"),
                    booking.check_out.as_deref().unwrap_or("?"),
                    booking.status.as_deref().unwrap_or("-"),
                    booking.total_amount.map(|a| a.to_string()).unwrap_or_default()
                );
            }
        }
        Command::Tasks => {
            for task in services.tasks.get_all().await {
                println!(
                    "{:>4}  {:<20} {:<12} {:<8} {:<12} {}",
                    task.id,
                    task.name.as_deref().unwrap_or("-"),
                    task.task_type.as_deref().unwrap_or("-"),
                    task.priority.as_deref().unwrap_or("-"),
                    task.status.as_deref().unwrap_or("-"),
                    task.assigned_to.as_deref().unwrap_or("unassigned")
                );
            }
        }
        Command::Staff { role } => {
            let staff = match role {
                Some(role) => services.staff.get_by_role(&Role::from(role.to_uppercase())).await,
                None => services.staff.get_all().await,
            };
            for member in staff {
                let role = member.role.as_ref().map(Role::as_str).unwrap_or("-");
                println!(
                    "{:>4}  {:<20} {:<10} {:<14} {}",
                    member.id,
                    member.full_name().unwrap_or_default(),
                    role,
                    member.department.as_deref().unwrap_or("-"),
                    member.email.as_deref().unwrap_or("-")
                );
            }
        }
        Command::Quote { room, check_in, check_out } => {
            let room = services.rooms.get_by_id(room).await?;
            let nights = stay_nights(&check_in, &check_out)
                .ok_or_else(|| anyhow::anyhow!("Invalid stay dates: {check_in} -> {check_out}"))?;
            let draft = BookingDraft::for_stay(&room, &check_in, &check_out);
            println!(
                "Room {}  {} -> {}  {} night(s)  total {}",
                room.number.as_deref().unwrap_or("-"),
                check_in,
                check_out,
                nights.max(0),
                draft.total_amount.unwrap_or_default()
            );
        }
        Command::Guests { search } => {
            let guests = match search {
                Some(term) => services.guests.search(&term).await,
                None => services.guests.get_all().await,
            };
            for guest in guests {
                println!(
                    "{:>4}  {:<20} {:<28} {:<12} {}",
                    guest.id,
                    guest.full_name().unwrap_or_default(),
                    guest.email.as_deref().unwrap_or("-"),
                    guest.phone.as_deref().unwrap_or("-"),
                    if guest.vip_status { "VIP" } else { "" }
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_staff_role() {
        let args = Args::parse_from(["hotelhub-desk", "staff", "--role", "manager", "--no-latency"]);
        assert!(args.no_latency);
        assert!(matches!(args.command, Command::Staff { role: Some(ref r) } if r == "manager"));
    }

    #[tokio::test]
    async fn test_quote_rejects_bad_dates() {
        let store = Arc::new(MemoryRecordStore::new());
        demo::seed(&store);
        let services = HotelServices::with_store(store, Latency::none());

        let command = Command::Quote {
            room: 1,
            check_in: "tomorrow".into(),
            check_out: "2026-10-23".into(),
        };
        assert!(run(&services, command).await.is_err());
    }

    #[tokio::test]
    async fn test_commands_run_on_demo_data() {
        let store = Arc::new(MemoryRecordStore::new());
        demo::seed(&store);
        let services = HotelServices::with_store(store, Latency::none());

        for command in [
            Command::Report,
            Command::Rooms { status: None },
            Command::Bookings,
            Command::Tasks,
            Command::Staff { role: Some("reception".into()) },
            Command::Quote {
                room: 1,
                check_in: "2026-10-20".into(),
                check_out: "2026-10-23".into(),
            },
            Command::Guests { search: Some("smith".into()) },
        ] {
            run(&services, command).await.unwrap();
        }
    }
}
