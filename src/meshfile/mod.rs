//! Structured-mesh interchange file.
//!
//! A file holds bases, each base holds zones, and each zone holds its size,
//! named coordinate arrays and boundary-condition point ranges. Handles are
//! opened for writing a new file, modifying an existing one, or reading.
//! Changes are kept in memory and persisted by `close`; a handle dropped
//! without closing releases the file and discards its changes.


use {
    crate::boundary::{BcType, PointRange},
    anyhow::{bail, ensure, Context, Result},
    byteorder::{ByteOrder, LittleEndian, WriteBytesExt},
    log::{debug, warn},
    serde::{Deserialize, Serialize},
    std::{
        fs::{File, OpenOptions},
        io::{prelude::*, BufWriter, SeekFrom},
        path::{Path, PathBuf},
    },
};

/// Leading bytes of a binary mesh file, "BMSH" in little-endian order
const MAGIC: u32 = 0x4853_4d42;
const VERSION: u32 = 1;
const HEADER_LEN: usize = 8;

/// On-disk encoding of a mesh file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Header followed by a bincode body
    Binary,
    /// Human-readable YAML
    Yaml,
}

impl Default for Format {
    fn default() -> Self {
        Format::Binary
    }
}

impl Format {
    pub fn extension(self) -> &'static str {
        match self {
            Format::Binary => "bmsh",
            Format::Yaml => "yaml",
        }
    }
}

/// Access mode of a `MeshFile` handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Create or truncate the file and start from an empty document
    Write(Format),
    /// Load an existing file and write it back in its own format
    Modify,
    Read,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneType {
    Structured,
}

/// Vertex, cell and boundary-vertex counts along each index direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSize {
    pub vertex: [usize; 3],
    pub cell: [usize; 3],
    pub boundary_vertex: [usize; 3],
}

impl ZoneSize {
    /// Size of a structured zone with the given vertex counts
    pub fn structured(vertex: [usize; 3]) -> Self {
        ZoneSize {
            vertex,
            cell: [
                vertex[0].saturating_sub(1),
                vertex[1].saturating_sub(1),
                vertex[2].saturating_sub(1),
            ],
            boundary_vertex: [0; 3],
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex.iter().product()
    }

    pub fn cell_count(&self) -> usize {
        self.cell.iter().product()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    pub bases: Vec<Base>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Base {
    pub name: String,
    pub cell_dim: u32,
    pub phys_dim: u32,
    pub zones: Vec<Zone>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub name: String,
    pub kind: ZoneType,
    pub size: ZoneSize,
    pub coordinates: Vec<Coordinate>,
    pub bocos: Vec<Boco>,
}

/// Double-precision coordinate array, first index varying fastest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub name: String,
    pub data: Vec<f64>,
}

/// Boundary condition applied over a point range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boco {
    pub name: String,
    pub kind: BcType,
    pub range: PointRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneId(pub usize);

/// Open handle on a mesh file
#[derive(Debug)]
pub struct MeshFile {
    path: PathBuf,
    file: File,
    mode: Mode,
    format: Format,
    document: Document,
    closed: bool,
}

impl MeshFile {
    pub fn open<P: AsRef<Path>>(path: P, mode: Mode) -> Result<Self> {
        let path = path.as_ref().to_owned();

        let (file, format, document) = match mode {
            Mode::Write(format) => {
                let file = File::create(&path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                (file, format, Document::default())
            }
            Mode::Modify | Mode::Read => {
                let mut file = OpenOptions::new()
                    .read(true)
                    .write(mode == Mode::Modify)
                    .open(&path)
                    .with_context(|| format!("Failed to open {}", path.display()))?;

                let mut bytes = Vec::new();
                file.read_to_end(&mut bytes)?;
                let (format, document) = decode(&bytes)
                    .with_context(|| format!("Failed to read mesh from {}", path.display()))?;
                (file, format, document)
            }
        };

        debug!("Opened {} in {:?} mode", path.display(), mode);

        Ok(MeshFile {
            path,
            file,
            mode,
            format,
            document,
            closed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Writes a base, replacing any base of the same name.
    pub fn write_base(&mut self, name: &str, cell_dim: u32, phys_dim: u32) -> Result<BaseId> {
        self.ensure_writable()?;
        ensure!(
            (1..=3).contains(&cell_dim) && cell_dim <= phys_dim && phys_dim <= 3,
            "Invalid dimensions for base {}: cell {}, physical {}",
            name,
            cell_dim,
            phys_dim
        );

        let base = Base {
            name: name.to_owned(),
            cell_dim,
            phys_dim,
            zones: Vec::new(),
        };

        Ok(BaseId(upsert(&mut self.document.bases, base, |b| b.name == name)))
    }

    /// Writes a structured zone, replacing any zone of the same name.
    pub fn write_zone(&mut self, base: BaseId, name: &str, size: ZoneSize) -> Result<ZoneId> {
        self.ensure_writable()?;

        let cell_dim = self.base(base)?.cell_dim as usize;
        ensure!(
            size.vertex[..cell_dim].iter().all(|&n| n >= 2),
            "Zone {} needs at least two vertices per direction, got {:?}",
            name,
            size.vertex
        );
        ensure!(
            size == ZoneSize::structured(size.vertex),
            "Inconsistent structured zone size for {}: {:?}",
            name,
            size
        );

        let zone = Zone {
            name: name.to_owned(),
            kind: ZoneType::Structured,
            size,
            coordinates: Vec::new(),
            bocos: Vec::new(),
        };

        let zones = &mut self.base_mut(base)?.zones;
        Ok(ZoneId(upsert(zones, zone, |z| z.name == name)))
    }

    pub fn read_zone(&self, base: BaseId, zone: ZoneId) -> Result<(&str, ZoneSize)> {
        let zone = self.zone(base, zone)?;
        Ok((zone.name.as_str(), zone.size))
    }

    /// Writes a coordinate array, replacing any array of the same name.
    pub fn write_coord(
        &mut self,
        base: BaseId,
        zone: ZoneId,
        name: &str,
        data: &[f64],
    ) -> Result<usize> {
        self.ensure_writable()?;

        let zone = self.zone_mut(base, zone)?;
        ensure!(
            data.len() == zone.size.vertex_count(),
            "Coordinate {} has {} values but zone {} has {} vertices",
            name,
            data.len(),
            zone.name,
            zone.size.vertex_count()
        );
        ensure!(
            data.iter().all(|v| v.is_finite()),
            "Coordinate {} of zone {} contains non-finite values",
            name,
            zone.name
        );

        let coordinate = Coordinate {
            name: name.to_owned(),
            data: data.to_vec(),
        };

        Ok(upsert(&mut zone.coordinates, coordinate, |c| c.name == name))
    }

    pub fn read_coord(&self, base: BaseId, zone: ZoneId, name: &str) -> Result<&[f64]> {
        let zone = self.zone(base, zone)?;
        match zone.coordinates.iter().find(|c| c.name == name) {
            Some(c) => Ok(&c.data),
            None => bail!("Zone {} has no coordinate named {}", zone.name, name),
        }
    }

    /// Writes a point-range boundary condition, replacing any of the same name.
    pub fn write_boco(
        &mut self,
        base: BaseId,
        zone: ZoneId,
        name: &str,
        kind: BcType,
        range: PointRange,
    ) -> Result<usize> {
        self.ensure_writable()?;

        let zone = self.zone_mut(base, zone)?;
        ensure!(
            range.fits(zone.size.vertex),
            "Boundary condition {} range {} lies outside zone {} of size {:?}",
            name,
            range,
            zone.name,
            zone.size.vertex
        );

        let boco = Boco {
            name: name.to_owned(),
            kind,
            range,
        };

        Ok(upsert(&mut zone.bocos, boco, |b| b.name == name))
    }

    pub fn bocos(&self, base: BaseId, zone: ZoneId) -> Result<&[Boco]> {
        Ok(&self.zone(base, zone)?.bocos)
    }

    /// Persists any changes and releases the file.
    pub fn close(mut self) -> Result<()> {
        self.closed = true;

        if self.mode == Mode::Read {
            return Ok(());
        }

        self.file.set_len(0)?;
        self.file.seek(SeekFrom::Start(0))?;

        let path = &self.path;
        let mut w = BufWriter::new(&mut self.file);
        encode(&mut w, self.format, &self.document)
            .with_context(|| format!("Failed to write mesh to {}", path.display()))?;
        w.flush()?;

        debug!("Closed {}", path.display());

        Ok(())
    }

    fn ensure_writable(&self) -> Result<()> {
        ensure!(
            self.mode != Mode::Read,
            "{} is open read-only",
            self.path.display()
        );
        Ok(())
    }

    fn base(&self, id: BaseId) -> Result<&Base> {
        match self.document.bases.get(id.0) {
            Some(b) => Ok(b),
            None => bail!("No base {} in {}", id.0, self.path.display()),
        }
    }

    fn base_mut(&mut self, id: BaseId) -> Result<&mut Base> {
        match self.document.bases.get_mut(id.0) {
            Some(b) => Ok(b),
            None => bail!("No base {} in {}", id.0, self.path.display()),
        }
    }

    fn zone(&self, base: BaseId, id: ZoneId) -> Result<&Zone> {
        let base = self.base(base)?;
        match base.zones.get(id.0) {
            Some(z) => Ok(z),
            None => bail!("No zone {} in base {}", id.0, base.name),
        }
    }

    fn zone_mut(&mut self, base: BaseId, id: ZoneId) -> Result<&mut Zone> {
        let base = self.base_mut(base)?;
        let name = base.name.clone();
        match base.zones.get_mut(id.0) {
            Some(z) => Ok(z),
            None => bail!("No zone {} in base {}", id.0, name),
        }
    }
}

impl Drop for MeshFile {
    fn drop(&mut self) {
        if !self.closed && self.mode != Mode::Read {
            warn!(
                "{} released without closing, changes were discarded",
                self.path.display()
            );
        }
    }
}

/// Replaces the first element matching `same` or appends, returning its index.
fn upsert<T, F: Fn(&T) -> bool>(items: &mut Vec<T>, item: T, same: F) -> usize {
    match items.iter().position(same) {
        Some(i) => {
            items[i] = item;
            i
        }
        None => {
            items.push(item);
            items.len() - 1
        }
    }
}

fn encode<W: Write>(w: &mut W, format: Format, document: &Document) -> Result<()> {
    match format {
        Format::Binary => {
            w.write_u32::<LittleEndian>(MAGIC)?;
            w.write_u32::<LittleEndian>(VERSION)?;
            bincode::serialize_into(w, document)?;
        }
        Format::Yaml => serde_yaml::to_writer(w, document)?,
    }
    Ok(())
}

fn decode(bytes: &[u8]) -> Result<(Format, Document)> {
    if bytes.len() >= HEADER_LEN && LittleEndian::read_u32(&bytes[..4]) == MAGIC {
        let version = LittleEndian::read_u32(&bytes[4..HEADER_LEN]);
        ensure!(version == VERSION, "Unsupported mesh file version {}", version);

        Ok((Format::Binary, bincode::deserialize(&bytes[HEADER_LEN..])?))
    } else {
        ensure!(!bytes.is_empty(), "Empty mesh file");

        Ok((Format::Yaml, serde_yaml::from_slice(bytes)?))
    }
}
