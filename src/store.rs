//! Flat-file persistence for reservations and transactions.
//!
//! The on-disk format is two sections separated by a line containing a
//! single `#`: reservations first, transactions second, one record per
//! line as whitespace-separated fields (dates as `MM-DD-YYYY`, times as
//! `HH:MM`). `Store` holds the in-memory copy behind a single mutex and
//! serializes every mutation through it; read-only listing can still
//! proceed concurrently since it only takes a read of the same guard
//! momentarily.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use parking_lot::Mutex;

use crate::models::{Reservation, Transaction, TransactionKind};

const SECTION_SEPARATOR: &str = "#";
const DATE_FORMAT: &str = "%m-%d-%Y";

struct StoreData {
    reservations: Vec<Reservation>,
    transactions: Vec<Transaction>,
}

/// In-memory reservation and transaction ledger, backed by a flat file.
pub struct Store {
    data: Mutex<StoreData>,
    path: PathBuf,
}

impl Store {
    /// Load a store from `path`. A missing file is treated as an empty store.
    pub fn load(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let (reservations, transactions) = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            parse(&contents)?
        } else {
            (Vec::new(), Vec::new())
        };

        Ok(Self {
            data: Mutex::new(StoreData {
                reservations,
                transactions,
            }),
            path,
        })
    }

    /// A point-in-time copy of every reservation on the books.
    pub fn snapshot_reservations(&self) -> Vec<Reservation> {
        self.data.lock().reservations.clone()
    }

    /// A point-in-time copy of every transaction ever recorded.
    pub fn snapshot_transactions(&self) -> Vec<Transaction> {
        self.data.lock().transactions.clone()
    }

    /// The id the next reservation appended should use.
    pub fn next_reservation_id(&self) -> u64 {
        self.data
            .lock()
            .reservations
            .last()
            .map(|r| r.reservation_id + 1)
            .unwrap_or(1)
    }

    /// The id the next transaction appended should use.
    pub fn next_transaction_id(&self) -> u64 {
        self.data.lock().transactions.len() as u64 + 1
    }

    /// Append a reservation and persist the store.
    pub fn append_reservation(&self, reservation: Reservation) -> std::io::Result<()> {
        let mut guard = self.data.lock();
        guard.reservations.push(reservation);
        persist(&self.path, &guard.reservations, &guard.transactions)
    }

    /// Append a transaction and persist the store.
    pub fn append_transaction(&self, transaction: Transaction) -> std::io::Result<()> {
        let mut guard = self.data.lock();
        guard.transactions.push(transaction);
        persist(&self.path, &guard.reservations, &guard.transactions)
    }

    /// Look up a reservation by id.
    pub fn find_reservation(&self, reservation_id: u64) -> Option<Reservation> {
        self.data
            .lock()
            .reservations
            .iter()
            .find(|r| r.reservation_id == reservation_id)
            .cloned()
    }

    /// Remove a reservation by id and persist the store. Returns the
    /// removed reservation, if it existed.
    pub fn remove_reservation(&self, reservation_id: u64) -> std::io::Result<Option<Reservation>> {
        let mut guard = self.data.lock();
        let index = guard
            .reservations
            .iter()
            .position(|r| r.reservation_id == reservation_id);
        let removed = index.map(|i| guard.reservations.remove(i));
        persist(&self.path, &guard.reservations, &guard.transactions)?;
        Ok(removed)
    }
}

fn persist(path: &Path, reservations: &[Reservation], transactions: &[Transaction]) -> std::io::Result<()> {
    let mut body = String::new();
    for reservation in reservations {
        body.push_str(&serialize_reservation(reservation));
        body.push('\n');
    }
    body.push_str(SECTION_SEPARATOR);
    body.push('\n');
    for transaction in transactions {
        body.push_str(&serialize_transaction(transaction));
        body.push('\n');
    }

    let tmp_path = path.with_extension("tmp");
    {
        let mut file = std::fs::File::create(&tmp_path)?;
        file.write_all(body.as_bytes())?;
        file.sync_all()?;
    }
    std::fs::rename(&tmp_path, path)
}

fn format_date(d: NaiveDate) -> String {
    d.format(DATE_FORMAT).to_string()
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

fn serialize_reservation(r: &Reservation) -> String {
    format!(
        "{} {} {} {} {} {} {} {} {} {}",
        r.reservation_id,
        r.customer_id,
        r.resource.as_str(),
        format_date(r.start_date),
        format_date(r.end_date),
        r.start_time,
        r.end_time,
        format_date(r.date_of_reservation),
        r.total_cost,
        r.down_payment,
    )
}

fn serialize_transaction(t: &Transaction) -> String {
    let kind_field = match t.kind {
        TransactionKind::Reservation => t.kind.as_str().to_string(),
        TransactionKind::Cancellation => format!("{}${}", t.kind.as_str(), t.amount),
    };
    format!(
        "{} {} {} {} {} {} {}",
        t.transaction_id,
        kind_field,
        format_date(t.transaction_date),
        serialize_reservation(&t.payload),
        t.amount,
        t.timestamp,
        t.staff_id,
    )
}

fn parse(contents: &str) -> std::io::Result<(Vec<Reservation>, Vec<Transaction>)> {
    let mut sections = contents.splitn(2, &format!("{SECTION_SEPARATOR}\n"));
    let reservations_block = sections.next().unwrap_or_default();
    let transactions_block = sections.next().unwrap_or_default();

    let invalid = |msg: String| std::io::Error::new(std::io::ErrorKind::InvalidData, msg);

    let reservations = reservations_block
        .lines()
        .filter(|l| !l.is_empty())
        .map(|l| parse_reservation(l).ok_or_else(|| invalid(format!("bad reservation line: {l}"))))
        .collect::<std::io::Result<Vec<_>>>()?;

    let transactions = transactions_block
        .lines()
        .filter(|l| !l.is_empty())
        .map(|l| parse_transaction(l).ok_or_else(|| invalid(format!("bad transaction line: {l}"))))
        .collect::<std::io::Result<Vec<_>>>()?;

    Ok((reservations, transactions))
}

fn parse_reservation(line: &str) -> Option<Reservation> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 10 {
        return None;
    }
    Some(Reservation {
        reservation_id: fields[0].parse().ok()?,
        customer_id: fields[1].to_string(),
        resource: crate::models::Resource::parse(fields[2])?,
        start_date: parse_date(fields[3])?,
        end_date: parse_date(fields[4])?,
        start_time: crate::models::HalfHourTime::parse(fields[5])?,
        end_time: crate::models::HalfHourTime::parse(fields[6])?,
        date_of_reservation: parse_date(fields[7])?,
        total_cost: fields[8].parse().ok()?,
        down_payment: fields[9].parse().ok()?,
    })
}

fn parse_transaction(line: &str) -> Option<Transaction> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 16 {
        return None;
    }
    let kind = if fields[1] == "RESERVATION" {
        TransactionKind::Reservation
    } else if fields[1].starts_with("CANCELLATION") {
        TransactionKind::Cancellation
    } else {
        return None;
    };
    let payload_fields = &fields[3..13];
    let payload = parse_reservation(&payload_fields.join(" "))?;

    Some(Transaction {
        transaction_id: fields[0].parse().ok()?,
        kind,
        transaction_date: parse_date(fields[2])?,
        payload,
        amount: fields[13].parse().ok()?,
        timestamp: fields[14].parse().ok()?,
        staff_id: fields[15].to_string(),
    })
}
