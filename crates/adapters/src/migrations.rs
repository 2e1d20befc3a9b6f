/// Tables shared by source and destination stores. Link and thumbnail rows
/// are independent; no foreign key ties their uids together.
pub const MIGRATIONS: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS links (
        uid TEXT PRIMARY KEY NOT NULL,
        path TEXT NOT NULL,
        name TEXT NOT NULL,
        ext TEXT NOT NULL,
        mime TEXT NOT NULL,
        date TEXT NOT NULL
    );",
    "CREATE TABLE IF NOT EXISTS thumbnails (
        uid TEXT PRIMARY KEY NOT NULL,
        data BLOB NOT NULL,
        mime TEXT NOT NULL,
        width INTEGER NOT NULL,
        height INTEGER NOT NULL
    );",
];
