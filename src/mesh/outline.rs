//! Boundary tracing over a triangle mesh.
//!
//! An edge is on the boundary when exactly one triangle holds both of its
//! endpoints. Loops are followed iteratively from vertex to vertex.

/// Vertex indices of one emitted triangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Triangle {
    pub a: u32,
    pub b: u32,
    pub c: u32,
}

impl Triangle {
    pub fn new(a: u32, b: u32, c: u32) -> Self {
        Self { a, b, c }
    }

    pub fn vertices(&self) -> [u32; 3] {
        [self.a, self.b, self.c]
    }

    pub fn contains(&self, vertex: u32) -> bool {
        self.a == vertex || self.b == vertex || self.c == vertex
    }
}

/// Triangles indexed by the vertices they touch.
pub struct TriangleAdjacency {
    triangles: Vec<Triangle>,
    by_vertex: Vec<Vec<usize>>,
}

impl TriangleAdjacency {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            triangles: Vec::new(),
            by_vertex: vec![Vec::new(); vertex_count],
        }
    }

    pub fn add(&mut self, triangle: Triangle) {
        let id = self.triangles.len();
        self.triangles.push(triangle);
        for v in triangle.vertices() {
            let v = v as usize;
            if v >= self.by_vertex.len() {
                self.by_vertex.resize(v + 1, Vec::new());
            }
            self.by_vertex[v].push(id);
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.by_vertex.len()
    }

    fn triangles_of(&self, vertex: u32) -> impl Iterator<Item = &Triangle> + '_ {
        self.by_vertex
            .get(vertex as usize)
            .into_iter()
            .flatten()
            .map(move |&id| &self.triangles[id])
    }

    /// Whether exactly one triangle contains both endpoints.
    pub fn is_outline_edge(&self, a: u32, b: u32) -> bool {
        self.triangles_of(a).filter(|t| t.contains(b)).take(2).count() == 1
    }

    /// First unchecked vertex joined to `vertex` by a boundary edge.
    fn next_outline_vertex(&self, vertex: u32, checked: &[bool]) -> Option<u32> {
        self.triangles_of(vertex)
            .flat_map(|t| t.vertices())
            .find(|&other| {
                other != vertex && !checked[other as usize] && self.is_outline_edge(vertex, other)
            })
    }
}

/// Trace every boundary loop reachable from an unchecked vertex.
///
/// `checked` arrives with the corners of solid squares already set; those
/// never start a loop. Each loop repeats its first vertex at the end.
pub fn trace_outlines(adjacency: &TriangleAdjacency, mut checked: Vec<bool>) -> Vec<Vec<u32>> {
    checked.resize(adjacency.vertex_count(), false);
    let mut outlines = Vec::new();

    for start in 0..adjacency.vertex_count() as u32 {
        if checked[start as usize] {
            continue;
        }
        let Some(first) = adjacency.next_outline_vertex(start, &checked) else {
            continue;
        };
        checked[start as usize] = true;

        let mut outline = vec![start];
        let mut current = first;
        loop {
            outline.push(current);
            checked[current as usize] = true;
            match adjacency.next_outline_vertex(current, &checked) {
                Some(next) => current = next,
                None => break,
            }
        }
        outline.push(start);
        outlines.push(outline);
    }

    outlines
}
