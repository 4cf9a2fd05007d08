use anyhow::Result;
use vfs_mem::{File, FsBackend, MemFS, OpenFlags, Whence};

fn main() -> Result<()> {
    env_logger::init();

    // the file system starts with just `/`
    let mut fs = MemFS::new();

    // creates `/docs`; the parent must exist
    fs.mkdir("/docs", 0o755)?;

    // creates `/docs/first.txt` and opens it read-write
    let mut first = fs.create("/docs/first.txt")?;
    first.write(b"Hello")?;

    // a second handle on the same file sees the data written through the first one
    let mut reader = fs.open("/docs/first.txt")?;
    let mut buf = [0u8; 5];
    reader.read(&mut buf)?;
    assert_eq!(&buf, b"Hello");

    // append through a new handle; the cursor starts at end of data
    let mut second = fs.open_file(
        "/docs/first.txt",
        OpenFlags::APPEND | OpenFlags::WRITE_ONLY,
        0,
    )?;
    second.write(b", World!")?;

    // read-only handles refuse to write
    assert!(reader.write(b"nope").is_err());
    reader.seek(0, Whence::Start)?;

    let content = fs.read("/docs/first.txt")?;
    println!("{}", String::from_utf8(content)?);

    let meta = fs.stat("/docs/first.txt")?;
    println!(
        "{}: {} bytes, mode {:o}, stat at {}",
        meta.name(),
        meta.len(),
        meta.mode(),
        meta.modified()
    );

    // nothing is persisted: everything is gone once `fs` is dropped
    Ok(())
}
