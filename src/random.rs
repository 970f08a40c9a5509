use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source de hasard injectée dans la grille et le générateur.
pub trait RandomSource {
    /// Index uniforme dans `0..len`. Appelé uniquement avec `len > 0`.
    fn pick(&mut self, len: usize) -> usize;
}

/// Tire un élément uniformément ; `None` si la tranche est vide.
pub fn choose<'a, T, S>(source: &mut S, items: &'a [T]) -> Option<&'a T>
where
    S: RandomSource + ?Sized,
{
    if items.is_empty() {
        return None;
    }
    items.get(source.pick(items.len()))
}

/// Adapte n'importe quel générateur `rand`.
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Source reproductible : même graine, même labyrinthe.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_os() -> Self {
        Self::new(StdRng::from_os_rng())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

/// Rejoue une suite fixe de tirages, en boucle.
///
/// Chaque tirage est ramené dans `0..len` par modulo, ce qui permet d'écrire
/// des scénarios déterministes sans connaître le nombre de voisins à l'avance.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    picks: Vec<usize>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(picks: Vec<usize>) -> Self {
        Self { picks, cursor: 0 }
    }

    /// Prend toujours le premier élément proposé.
    pub fn first() -> Self {
        Self::new(vec![0])
    }
}

impl RandomSource for ScriptedSource {
    fn pick(&mut self, len: usize) -> usize {
        if self.picks.is_empty() {
            return 0;
        }
        let pick = self.picks[self.cursor % self.picks.len()];
        self.cursor += 1;
        pick % len
    }
}
