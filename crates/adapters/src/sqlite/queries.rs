use loadlink_domain::{Link, Thumbnail};
use rusqlite::{params, Connection, Result, Row};

pub const SELECT_LINKS: &str = "SELECT uid, path, name, ext, mime, date FROM links";

pub const SELECT_THUMBNAILS: &str = "SELECT uid, data, mime, width, height FROM thumbnails";

pub fn link_from_row(row: &Row<'_>) -> Result<Link> {
    Ok(Link {
        uid: row.get(0)?,
        path: row.get(1)?,
        name: row.get(2)?,
        ext: row.get(3)?,
        mime: row.get(4)?,
        date: row.get(5)?,
    })
}

pub fn thumbnail_from_row(row: &Row<'_>) -> Result<Thumbnail> {
    Ok(Thumbnail {
        uid: row.get(0)?,
        data: row.get(1)?,
        mime: row.get(2)?,
        width: row.get(3)?,
        height: row.get(4)?,
    })
}

/// Returns the number of rows written: 0 when the uid already exists.
pub fn insert_link(conn: &Connection, link: &Link) -> Result<usize> {
    conn.execute(
        "INSERT INTO links (uid, path, name, ext, mime, date)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(uid) DO NOTHING",
        params![link.uid, link.path, link.name, link.ext, link.mime, link.date],
    )
}

/// Returns the number of rows written: 0 when the uid already exists.
pub fn insert_thumbnail(conn: &Connection, thumbnail: &Thumbnail) -> Result<usize> {
    conn.execute(
        "INSERT INTO thumbnails (uid, data, mime, width, height)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(uid) DO NOTHING",
        params![
            thumbnail.uid,
            thumbnail.data,
            thumbnail.mime,
            thumbnail.width,
            thumbnail.height,
        ],
    )
}

pub fn find_link(conn: &Connection, uid: &str) -> Result<Option<Link>> {
    let mut stmt = conn.prepare(
        "SELECT uid, path, name, ext, mime, date
         FROM links
         WHERE uid = ?1",
    )?;
    let mut rows = stmt.query(params![uid])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(link_from_row(row)?));
    }
    Ok(None)
}

pub fn find_thumbnail(conn: &Connection, uid: &str) -> Result<Option<Thumbnail>> {
    let mut stmt = conn.prepare(
        "SELECT uid, data, mime, width, height
         FROM thumbnails
         WHERE uid = ?1",
    )?;
    let mut rows = stmt.query(params![uid])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(thumbnail_from_row(row)?));
    }
    Ok(None)
}

pub fn count_rows(conn: &Connection, table: &str) -> Result<i64> {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
}
